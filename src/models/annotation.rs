use crate::models::adducts::{AdductTable, AdductTables, IonizationMode};
use crate::models::lipid::Lipid;
use crate::models::peak::{dedup_peaks, Peak};
use crate::utils::tolerance_ranges::abs_tol_range;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, trace};

/// Maximum absolute m/z discrepancy for two masses to count as the same.
pub const MZ_TOLERANCE: f64 = 0.01;

/// Sentinel adduct name for every path where detection finds nothing.
pub const UNKNOWN_ADDUCT: &str = "unknown";

/// One annotated lipid candidate: the identification, the signals grouped at
/// its retention time, the adduct resolved at construction time and the
/// scoring state accumulated by downstream steps.
///
/// Identity (equality + hashing) is the (lipid, mz, rt_min) triple with exact
/// f64 bit comparison; intensity, adduct and scores are deliberately left
/// out so re-scored or re-adducted annotations still collapse to the same
/// candidate.
///
/// Scoring fields are not synchronized. An instance is meant to be mutated
/// by one owner at a time; callers that share one across threads must bring
/// their own locking.
#[derive(Debug, Clone)]
pub struct Annotation {
    lipid: Arc<Lipid>,
    mz: f64,
    intensity: f64,
    rt_min: f64,
    ionization_mode: IonizationMode,
    adduct: String,
    grouped_signals: Vec<Peak>,
    score: i64,
    scores_applied: u32,
}

impl Annotation {
    /// An annotation without grouped signals. Detection has nothing to work
    /// with, so the adduct stays "unknown" until overridden.
    pub fn new(
        lipid: Arc<Lipid>,
        mz: f64,
        intensity: f64,
        rt_min: f64,
        ionization_mode: IonizationMode,
    ) -> Self {
        Self::with_grouped_signals(lipid, mz, intensity, rt_min, ionization_mode, &[])
    }

    /// An annotation with grouped signals, resolved against the builtin
    /// adduct tables.
    pub fn with_grouped_signals(
        lipid: Arc<Lipid>,
        mz: f64,
        intensity: f64,
        rt_min: f64,
        ionization_mode: IonizationMode,
        grouped_signals: &[Peak],
    ) -> Self {
        Self::with_tables(
            lipid,
            mz,
            intensity,
            rt_min,
            ionization_mode,
            grouped_signals,
            AdductTables::builtin(),
        )
    }

    /// Full constructor with caller-supplied reference tables. Adduct
    /// detection runs here, before the value is returned.
    pub fn with_tables(
        lipid: Arc<Lipid>,
        mz: f64,
        intensity: f64,
        rt_min: f64,
        ionization_mode: IonizationMode,
        grouped_signals: &[Peak],
        tables: &AdductTables,
    ) -> Self {
        let grouped_signals = dedup_peaks(grouped_signals);
        let adduct = detect_adduct(&grouped_signals, ionization_mode, tables)
            .unwrap_or_else(|| UNKNOWN_ADDUCT.to_string());
        Self {
            lipid,
            mz,
            intensity,
            rt_min,
            ionization_mode,
            adduct,
            grouped_signals,
            score: 0,
            scores_applied: 0,
        }
    }

    pub fn lipid(&self) -> &Arc<Lipid> {
        &self.lipid
    }

    pub fn mz(&self) -> f64 {
        self.mz
    }

    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    pub fn rt_min(&self) -> f64 {
        self.rt_min
    }

    pub fn ionization_mode(&self) -> IonizationMode {
        self.ionization_mode
    }

    pub fn adduct(&self) -> &str {
        &self.adduct
    }

    /// Overrides the detected adduct. Escape hatch for pipelines that settle
    /// the adduct with a more informed downstream step.
    pub fn set_adduct(&mut self, adduct: impl Into<String>) {
        self.adduct = adduct.into();
    }

    /// Read-only view of the deduplicated signal group.
    pub fn grouped_signals(&self) -> &[Peak] {
        &self.grouped_signals
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Overwrites the running total without counting as an applied score.
    pub fn set_score(&mut self, score: i64) {
        self.score = score;
    }

    /// Adds to the running total and counts one application, whatever the
    /// magnitude or sign of `delta`.
    pub fn add_score(&mut self, delta: i64) {
        self.score += delta;
        self.scores_applied += 1;
    }

    pub fn scores_applied(&self) -> u32 {
        self.scores_applied
    }

    /// Mean applied score, or 0.0 when nothing has been applied yet.
    pub fn normalized_score(&self) -> f64 {
        if self.scores_applied > 0 {
            self.score as f64 / self.scores_applied as f64
        } else {
            0.0
        }
    }
}

impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.mz.to_bits() == other.mz.to_bits()
            && self.rt_min.to_bits() == other.rt_min.to_bits()
            && self.lipid == other.lipid
    }
}

impl Eq for Annotation {}

impl Hash for Annotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lipid.hash(state);
        self.mz.to_bits().hash(state);
        self.rt_min.to_bits().hash(state);
    }
}

impl Display for Annotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Annotation({}, mz={:.4}, RT={:.2}, adduct={}, intensity={:.1}, score={})",
            self.lipid.name, self.mz, self.rt_min, self.adduct, self.intensity, self.score
        )
    }
}

/// Resolves an adduct name for a signal group, trying the table matching the
/// ionization mode first and the opposite-polarity table as a fallback.
/// `None` means neither table produced a match; there is no error path.
fn detect_adduct(
    grouped_signals: &[Peak],
    ionization_mode: IonizationMode,
    tables: &AdductTables,
) -> Option<String> {
    if grouped_signals.is_empty() {
        return None;
    }
    if let Some(name) = scan_table(grouped_signals, tables.primary(ionization_mode)) {
        debug!("Resolved adduct {} from the {:?} table", name, ionization_mode);
        return Some(name);
    }
    let fallback = scan_table(grouped_signals, tables.secondary(ionization_mode));
    match &fallback {
        Some(name) => debug!("Resolved adduct {} from the fallback table", name),
        None => debug!("No adduct within tolerance in either table"),
    }
    fallback
}

/// First-match-wins scan over one table. A candidate entry is accepted when
/// the neutral mass it implies, shifted by a *different* entry of the same
/// table, lands back on the observed m/z within tolerance. Comparing an
/// entry against itself reproduces the observed m/z exactly and would accept
/// every candidate, so the diagonal is skipped.
fn scan_table(grouped_signals: &[Peak], table: &AdductTable) -> Option<String> {
    for peak in grouped_signals {
        let observed_mz = peak.mz;
        let accepted = abs_tol_range(observed_mz, MZ_TOLERANCE);
        for (i, candidate) in table.entries.iter().enumerate() {
            let neutral_mass = observed_mz - candidate.delta;
            for (j, other) in table.entries.iter().enumerate() {
                if i == j {
                    continue;
                }
                let expected_mz = neutral_mass + other.delta;
                if accepted.contains(&expected_mz) {
                    trace!(
                        "Peak mz {} matches {} (corroborated by {})",
                        observed_mz,
                        candidate.name,
                        other.name
                    );
                    return Some(candidate.name.clone());
                }
            }
        }
    }
    None
}
