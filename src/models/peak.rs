use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A single co-eluting signal. Peaks carry no identity beyond their values,
/// so equality and hashing go through the raw f64 bits, which keeps NaN and
/// signed zero behavior consistent between `eq` and `hash`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Peak {
    pub mz: f64,
    pub intensity: f64,
}

impl Peak {
    pub fn new(mz: f64, intensity: f64) -> Self {
        Self { mz, intensity }
    }
}

impl PartialEq for Peak {
    fn eq(&self, other: &Self) -> bool {
        self.mz.to_bits() == other.mz.to_bits()
            && self.intensity.to_bits() == other.intensity.to_bits()
    }
}

impl Eq for Peak {}

impl Hash for Peak {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mz.to_bits().hash(state);
        self.intensity.to_bits().hash(state);
    }
}

/// Set semantics with a deterministic scan order: duplicates are dropped,
/// first occurrence wins, insertion order is preserved. Groups are small
/// (a handful of co-eluting signals) so the quadratic membership check is
/// not worth a hash set.
pub fn dedup_peaks(peaks: &[Peak]) -> Vec<Peak> {
    let mut out: Vec<Peak> = Vec::with_capacity(peaks.len());
    for peak in peaks {
        if !out.contains(peak) {
            out.push(*peak);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_value_equality() {
        let a = Peak::new(100.0, 50.0);
        let b = Peak::new(100.0, 50.0);
        let c = Peak::new(100.0, 51.0);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let peaks = [
            Peak::new(100.0, 1.0),
            Peak::new(200.0, 2.0),
            Peak::new(100.0, 1.0),
            Peak::new(150.0, 3.0),
        ];
        let deduped = dedup_peaks(&peaks);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[0].mz, 100.0);
        assert_eq!(deduped[1].mz, 200.0);
        assert_eq!(deduped[2].mz, 150.0);
    }
}
