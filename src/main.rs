use lipidannot::models::adducts::{AdductTables, IonizationMode};
use lipidannot::models::annotation::Annotation;
use lipidannot::models::lipid::Lipid;
use lipidannot::models::peak::Peak;

use clap::{Parser, Subcommand};
use indicatif::ParallelProgressIterator;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tabled::{Table, Tabled};
use tracing::info;
use tracing::subscriber::set_global_default;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::EnvFilter;

// Read json with candidate identifications
// Optionally read json with adduct tables
// Annotate every candidate
// Serialize results + print a summary table

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
struct AnnotateArgs {
    /// The path to the json file with the candidate identifications.
    #[arg(short, long)]
    candidates_path: String,

    /// The path to a json file with custom adduct tables.
    /// Uses the builtin tables when omitted.
    #[arg(short, long)]
    adduct_tables_path: Option<String>,

    /// The path to the output files.
    #[arg(short, long)]
    output_path: String,

    // Whether the output json should be pretty printed.
    #[arg(short, long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct WriteTemplateArgs {
    /// The path to the output files.
    #[arg(short, long)]
    output_path: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Annotate candidate identifications with their adducts.
    Annotate(AnnotateArgs),
    WriteTemplate(WriteTemplateArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CandidateRecord {
    lipid: Lipid,
    mz: f64,
    intensity: f64,
    rt_min: f64,
    ionization_mode: IonizationMode,
    grouped_signals: Vec<Peak>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CandidateResults {
    candidate: CandidateRecord,
    adduct: String,
    elution_rank: u8,
}

#[derive(Debug, Tabled)]
struct SummaryRow {
    lipid: String,
    rank: u8,
    mz: String,
    rt_min: String,
    adduct: String,
    signals: usize,
}

fn main() {
    setup_tracing();
    let args = Args::parse();

    match args.command {
        Some(Commands::Annotate(args)) => main_annotate(args),
        Some(Commands::WriteTemplate(args)) => main_write_template(args),
        None => {
            println!("No command provided");
        }
    }
}

fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let formatting_layer = BunyanFormattingLayer::new("lipidannot".into(), std::io::stdout);
    let subscriber = Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer);

    set_global_default(subscriber).expect("Setting default subscriber failed");
}

fn template_candidates(num: usize) -> Vec<CandidateRecord> {
    let head_groups = ["PG", "PE", "PI", "PA", "PS", "PC"];
    let mut candidates = Vec::with_capacity(num);
    for i in 0..num {
        let head_group = head_groups[i % head_groups.len()];
        let mz = 700.0 + (i as f64 * 10.0);
        let rt_min = 10.0 + (i as f64 * 0.5);
        candidates.push(CandidateRecord {
            lipid: Lipid::new(format!("{} 34:{}", head_group, i % 4), head_group),
            mz,
            intensity: 1e5,
            rt_min,
            ionization_mode: IonizationMode::Positive,
            // The candidate's own peak plus a sodiated companion signal.
            grouped_signals: vec![Peak::new(mz, 1e5), Peak::new(mz + 21.981942, 2e4)],
        });
    }
    candidates
}

fn main_write_template(args: WriteTemplateArgs) {
    let output_path = args.output_path;
    let candidates = template_candidates(10);
    let tables = AdductTables::builtin();

    // Serialize both and write as files in the output path.
    // Do pretty serialization.
    let candidates_json = serde_json::to_string_pretty(&candidates).unwrap();
    let tables_json = serde_json::to_string_pretty(tables).unwrap();

    let put_path = std::path::Path::new(&output_path);
    std::fs::create_dir_all(put_path).unwrap();
    println!("Writing to {}", put_path.display());
    let candidates_json_path = put_path.join("candidates.json");
    let tables_json_path = put_path.join("adduct_tables.json");
    std::fs::write(candidates_json_path.clone(), candidates_json).unwrap();
    std::fs::write(tables_json_path.clone(), tables_json).unwrap();
    println!(
        "use as `lipidannot annotate --pretty --output-path '.' --candidates-path {:#?} --adduct-tables-path {:#?}`",
        candidates_json_path, tables_json_path,
    );
}

fn annotate_candidate(candidate: CandidateRecord, tables: &AdductTables) -> CandidateResults {
    let annotation = Annotation::with_tables(
        Arc::new(candidate.lipid.clone()),
        candidate.mz,
        candidate.intensity,
        candidate.rt_min,
        candidate.ionization_mode,
        &candidate.grouped_signals,
        tables,
    );
    let adduct = annotation.adduct().to_string();
    let elution_rank = annotation.lipid().elution_rank();
    CandidateResults {
        candidate,
        adduct,
        elution_rank,
    }
}

fn main_annotate(args: AnnotateArgs) {
    let candidates_path = args.candidates_path;
    let output_path = args.output_path;

    let tables = match args.adduct_tables_path {
        Some(path) => AdductTables::from_path(&path).unwrap(),
        None => AdductTables::builtin().clone(),
    };
    let candidates: Vec<CandidateRecord> =
        serde_json::from_str(&std::fs::read_to_string(&candidates_path).unwrap()).unwrap();
    info!("Annotating {} candidates", candidates.len());

    let num_candidates = candidates.len();
    let mut out: Vec<CandidateResults> = candidates
        .into_par_iter()
        .progress_count(num_candidates as u64)
        .map(|candidate| annotate_candidate(candidate, &tables))
        .collect();

    // Head-group elution order first, retention time as a tiebreak.
    out.sort_by(|a, b| {
        a.elution_rank
            .cmp(&b.elution_rank)
            .then(a.candidate.rt_min.total_cmp(&b.candidate.rt_min))
    });

    let rows: Vec<SummaryRow> = out
        .iter()
        .map(|res| SummaryRow {
            lipid: res.candidate.lipid.name.clone(),
            rank: res.elution_rank,
            mz: format!("{:.4}", res.candidate.mz),
            rt_min: format!("{:.2}", res.candidate.rt_min),
            adduct: res.adduct.clone(),
            signals: res.candidate.grouped_signals.len(),
        })
        .collect();
    println!("{}", Table::new(rows));

    let put_path = std::path::Path::new(&output_path).join("annotations.json");
    std::fs::create_dir_all(put_path.parent().unwrap()).unwrap();
    println!("Writing to {}", put_path.display());

    let serialized = if args.pretty {
        println!("Pretty printing enabled");
        serde_json::to_string_pretty(&out).unwrap()
    } else {
        serde_json::to_string(&out).unwrap()
    };
    std::fs::write(put_path, serialized).unwrap();
}
