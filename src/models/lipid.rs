use serde::{Deserialize, Serialize};

// Elution ranks for the phospholipid head groups, earliest eluting first.
// Codes outside this list rank 0 so unknown classes sort ahead of known ones.
const HEAD_GROUP_RANKS: &[(&str, u8)] = &[
    ("PG", 1),
    ("PE", 2),
    ("PI", 3),
    ("PA", 4),
    ("PS", 5),
    ("PC", 6),
];

/// Returns the elution-order rank for a head-group type code.
/// PG=1, PE=2, PI=3, PA=4, PS=5, PC=6; anything else is 0.
pub fn head_group_rank(code: &str) -> u8 {
    HEAD_GROUP_RANKS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, rank)| *rank)
        .unwrap_or(0)
}

/// The identified species an annotation refers to. Produced by the upstream
/// identification step; this crate only reads the display name and the
/// head-group code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lipid {
    pub name: String,
    pub head_group: String,
}

impl Lipid {
    pub fn new(name: impl Into<String>, head_group: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            head_group: head_group.into(),
        }
    }

    pub fn elution_rank(&self) -> u8 {
        head_group_rank(&self.head_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_group_rank_known_codes() {
        assert_eq!(head_group_rank("PG"), 1);
        assert_eq!(head_group_rank("PE"), 2);
        assert_eq!(head_group_rank("PI"), 3);
        assert_eq!(head_group_rank("PA"), 4);
        assert_eq!(head_group_rank("PS"), 5);
        assert_eq!(head_group_rank("PC"), 6);
    }

    #[test]
    fn test_head_group_rank_unknown_code() {
        assert_eq!(head_group_rank("XX"), 0);
        assert_eq!(head_group_rank(""), 0);
        // Lookup is case sensitive, lowercase codes are not recognized.
        assert_eq!(head_group_rank("pc"), 0);
    }

    #[test]
    fn test_lipid_elution_rank() {
        let lipid = Lipid::new("PC 34:1", "PC");
        assert_eq!(lipid.elution_rank(), 6);
    }
}
