use crate::errors::{InvalidTableError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

/// Polarity of ion detection. Decides which adduct table is scanned first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IonizationMode {
    Positive,
    Negative,
}

/// Mass shift of a singly charged ESI adduct relative to the neutral molecule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdductShift {
    pub name: String,
    pub delta: f64,
}

/// An ordered list of adduct shifts. The order is load-bearing: detection
/// scans entries front to back and the first match wins, so tables are kept
/// as vecs (declaration order for the builtin ones, file order for tables
/// read from json) instead of a hash map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdductTable {
    pub entries: Vec<AdductShift>,
}

impl AdductTable {
    pub fn from_shifts(shifts: &[(&str, f64)]) -> Self {
        Self {
            entries: shifts
                .iter()
                .map(|(name, delta)| AdductShift {
                    name: (*name).to_string(),
                    delta: *delta,
                })
                .collect(),
        }
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|shift| shift.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// Monoisotopic shifts for the common singly charged ESI adducts.
const POSITIVE_SHIFTS: &[(&str, f64)] = &[
    ("[M+H]+", 1.007276),
    ("[M+NH4]+", 18.033823),
    ("[M+Na]+", 22.989218),
    ("[M+K]+", 38.963158),
    ("[M+H-H2O]+", -17.003289),
];

const NEGATIVE_SHIFTS: &[(&str, f64)] = &[
    ("[M-H]-", -1.007276),
    ("[M+Cl]-", 34.969402),
    ("[M+HCOO]-", 44.998201),
    ("[M+CH3COO]-", 59.013851),
    ("[M-H-H2O]-", -19.017841),
];

static BUILTIN_TABLES: LazyLock<AdductTables> = LazyLock::new(AdductTables::default);

/// The pair of reference tables detection works against, one per polarity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdductTables {
    pub positive: AdductTable,
    pub negative: AdductTable,
}

impl Default for AdductTables {
    fn default() -> Self {
        Self {
            positive: AdductTable::from_shifts(POSITIVE_SHIFTS),
            negative: AdductTable::from_shifts(NEGATIVE_SHIFTS),
        }
    }
}

impl AdductTables {
    /// The builtin tables, instantiated once per process.
    pub fn builtin() -> &'static Self {
        &BUILTIN_TABLES
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let tables: Self = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// The table matching the ionization mode, tried first.
    pub fn primary(&self, mode: IonizationMode) -> &AdductTable {
        match mode {
            IonizationMode::Positive => &self.positive,
            IonizationMode::Negative => &self.negative,
        }
    }

    /// The opposite-polarity table, used as a fallback.
    pub fn secondary(&self, mode: IonizationMode) -> &AdductTable {
        match mode {
            IonizationMode::Positive => &self.negative,
            IonizationMode::Negative => &self.positive,
        }
    }

    fn validate(&self) -> std::result::Result<(), InvalidTableError> {
        for (polarity, table) in [("positive", &self.positive), ("negative", &self.negative)] {
            if table.is_empty() {
                return Err(InvalidTableError::EmptyTable { polarity });
            }
            for shift in &table.entries {
                if !shift.delta.is_finite() {
                    return Err(InvalidTableError::NonFiniteDelta {
                        name: shift.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_order() {
        let tables = AdductTables::builtin();
        assert!(!tables.positive.is_empty());
        assert!(!tables.negative.is_empty());
        // Declaration order is preserved, protonation variants first.
        assert_eq!(tables.positive.entries[0].name, "[M+H]+");
        assert_eq!(tables.negative.entries[0].name, "[M-H]-");
    }

    #[test]
    fn test_primary_secondary_selection() {
        let tables = AdductTables::builtin();
        assert!(tables
            .primary(IonizationMode::Positive)
            .contains_name("[M+H]+"));
        assert!(tables
            .secondary(IonizationMode::Positive)
            .contains_name("[M-H]-"));
        assert!(tables
            .primary(IonizationMode::Negative)
            .contains_name("[M-H]-"));
        assert!(tables
            .secondary(IonizationMode::Negative)
            .contains_name("[M+H]+"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "positive": [{"name": "[M+H]+", "delta": 1.007276}],
            "negative": [{"name": "[M-H]-", "delta": -1.007276}]
        }"#;
        let tables = AdductTables::from_json(json).unwrap();
        assert_eq!(tables.positive.len(), 1);
        assert_eq!(tables.negative.entries[0].delta, -1.007276);
    }

    #[test]
    fn test_from_json_rejects_empty_table() {
        let json = r#"{"positive": [], "negative": [{"name": "[M-H]-", "delta": -1.007276}]}"#;
        assert!(AdductTables::from_json(json).is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_delta() {
        let mut tables = AdductTables::default();
        tables.positive.entries[0].delta = f64::INFINITY;
        assert!(tables.validate().is_err());
    }
}
