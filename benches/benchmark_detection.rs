use lipidannot::models::adducts::{AdductTables, IonizationMode};
use lipidannot::models::annotation::Annotation;
use lipidannot::models::lipid::Lipid;
use lipidannot::models::peak::Peak;
use lipidannot::UNKNOWN_ADDUCT;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Instant;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{
    BunyanFormattingLayer,
    JsonStorageLayer,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::EnvFilter;

const NUM_GROUPS: usize = 100_000;
const PEAKS_PER_GROUP: usize = 4;

fn main() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new("lipidannot".into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);

    set_global_default(subscriber).expect("Setting default subscriber failed");

    // Fixed seed so runs are comparable.
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let tables = AdductTables::builtin();
    let lipid = Arc::new(Lipid::new("PC 34:1", "PC"));

    let groups: Vec<Vec<Peak>> = (0..NUM_GROUPS)
        .map(|_| {
            (0..PEAKS_PER_GROUP)
                .map(|_| {
                    Peak::new(
                        rng.gen_range(400.0..1000.0),
                        rng.gen_range(1e3..1e6),
                    )
                })
                .collect()
        })
        .collect();

    println!("Starting detection over {} groups", NUM_GROUPS);
    let start = Instant::now();
    let mut resolved = 0usize;
    for (i, group) in groups.iter().enumerate() {
        let mode = if i % 2 == 0 {
            IonizationMode::Positive
        } else {
            IonizationMode::Negative
        };
        let annotation = Annotation::with_tables(
            lipid.clone(),
            group[0].mz,
            group[0].intensity,
            (i % 30) as f64,
            mode,
            group,
            tables,
        );
        if annotation.adduct() != UNKNOWN_ADDUCT {
            resolved += 1;
        }
    }
    let elapsed = start.elapsed();
    println!("Elapsed: {:.2?} ({} of {} resolved)", elapsed, resolved, NUM_GROUPS);
}
