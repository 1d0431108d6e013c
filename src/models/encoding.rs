//! Chromosome layouts.
//!
//! Both layouts draw distinct gene values from `[0, N)` where `N` is the
//! slot count of the suitability table. Gene position `i` is slot `i`.
//!
//! | Layout | Genes | Value `g` means |
//! |--------|-------|-----------------|
//! | `Full` | `N` | use `g` |
//! | `Partial` | `N - 1` | unassigned if `g == 0`, otherwise use `g - 1` |

use serde::{Deserialize, Serialize};

use super::SuitabilityTable;

/// Gene value: an index into `[0, N)`.
pub type Gene = usize;

/// How a chromosome's genes map onto the suitability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// `N - 1` genes; value 0 leaves its slot unassigned.
    #[default]
    Partial,
    /// `N` genes forming a full permutation of `[0, N)`.
    Full,
}

impl Encoding {
    /// Chromosome length for a table with `slot_count` rows.
    pub fn gene_count(self, slot_count: usize) -> usize {
        match self {
            Encoding::Partial => slot_count.saturating_sub(1),
            Encoding::Full => slot_count,
        }
    }

    /// Number of table columns this layout may address.
    pub fn required_uses(self, slot_count: usize) -> usize {
        match self {
            Encoding::Partial => slot_count.saturating_sub(1),
            Encoding::Full => slot_count,
        }
    }

    /// Use index a gene resolves to, `None` for the unassigned sentinel.
    pub fn use_of(self, gene: Gene) -> Option<usize> {
        match self {
            Encoding::Partial => gene.checked_sub(1),
            Encoding::Full => Some(gene),
        }
    }

    /// Score of `gene` placed at `slot`.
    pub fn score(self, table: &SuitabilityTable, slot: usize, gene: Gene) -> u32 {
        self.use_of(gene)
            .map(|use_index| table.score(slot, use_index))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_counts() {
        assert_eq!(Encoding::Partial.gene_count(8), 7);
        assert_eq!(Encoding::Full.gene_count(8), 8);
    }

    #[test]
    fn test_partial_sentinel() {
        let table = SuitabilityTable::buildings();
        assert_eq!(Encoding::Partial.use_of(0), None);
        assert_eq!(Encoding::Partial.use_of(3), Some(2));
        assert_eq!(Encoding::Partial.score(&table, 0, 0), 0);
        assert_eq!(Encoding::Partial.score(&table, 0, 1), 35);
    }

    #[test]
    fn test_full_maps_directly() {
        let table = SuitabilityTable::buildings();
        assert_eq!(Encoding::Full.use_of(0), Some(0));
        assert_eq!(Encoding::Full.score(&table, 1, 3), 25);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Encoding::Partial).unwrap();
        assert_eq!(json, "\"partial\"");
        let full: Encoding = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(full, Encoding::Full);
    }
}
