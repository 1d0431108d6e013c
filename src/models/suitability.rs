//! Suitability table model.
//!
//! A suitability table scores how well each slot (row) serves each use
//! (column). It is read-only for the duration of a run and is the only
//! input to fitness evaluation.

use serde::{Deserialize, Serialize};

use super::Encoding;
use crate::error::{Error, Result};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Building suitability scores shipped with the optimizer.
///
/// Eight buildings (rows) scored against seven functions (columns).
pub const BUILDING_SUITABILITIES: [[u32; 7]; 8] = [
    [35, 10, 12, 7, 12, 24, 15],
    [30, 14, 16, 25, 25, 29, 28],
    [18, 22, 21, 29, 27, 37, 37],
    [20, 34, 27, 26, 26, 34, 28],
    [24, 26, 35, 15, 15, 37, 29],
    [24, 19, 25, 24, 24, 20, 23],
    [18, 22, 30, 25, 27, 21, 19],
    [33, 29, 22, 25, 25, 25, 33],
];

/// Read-only (slot, use) -> score mapping.
///
/// Rows are slots, columns are uses. Every row has the same length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")]
pub struct SuitabilityTable {
    scores: Vec<Vec<u32>>,
    use_count: usize,
}

impl SuitabilityTable {
    /// Creates a table from row-major scores.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] if the table has no rows, no columns, or
    /// rows of different lengths.
    pub fn new(scores: Vec<Vec<u32>>) -> Result<Self> {
        let use_count = scores.first().map(Vec::len).unwrap_or(0);
        if use_count == 0 {
            return Err(Error::InvalidConfig(vec![ValidationError::new(
                ValidationErrorKind::EmptyTable,
                "Suitability table has no rows or no columns",
            )]));
        }

        let ragged: Vec<ValidationError> = scores
            .iter()
            .enumerate()
            .filter(|(_, row)| row.len() != use_count)
            .map(|(slot, row)| {
                ValidationError::new(
                    ValidationErrorKind::RaggedTable,
                    format!(
                        "Slot {} has {} scores, expected {}",
                        slot,
                        row.len(),
                        use_count
                    ),
                )
            })
            .collect();
        if !ragged.is_empty() {
            return Err(Error::InvalidConfig(ragged));
        }

        Ok(Self { scores, use_count })
    }

    /// The built-in 8x7 building table.
    pub fn buildings() -> Self {
        Self {
            scores: BUILDING_SUITABILITIES.iter().map(|row| row.to_vec()).collect(),
            use_count: 7,
        }
    }

    /// Number of slots (rows).
    pub fn slot_count(&self) -> usize {
        self.scores.len()
    }

    /// Number of uses (columns).
    pub fn use_count(&self) -> usize {
        self.use_count
    }

    /// Score of `use_index` placed in `slot`.
    ///
    /// # Panics
    /// If either index is out of range. Chromosomes are validated against
    /// the table before evaluation, so this never fires in a run.
    pub fn score(&self, slot: usize, use_index: usize) -> u32 {
        self.scores[slot][use_index]
    }

    /// Sum of the best score of every slot the encoding evaluates.
    ///
    /// No chromosome can exceed this value; it is reached only when the
    /// per-slot maxima fall on distinct uses.
    pub fn upper_bound(&self, encoding: Encoding) -> u32 {
        let scored = encoding.gene_count(self.slot_count()).min(self.slot_count());
        self.scores[..scored]
            .iter()
            .map(|row| row.iter().copied().max().unwrap_or(0))
            .sum()
    }

    /// Exact best fitness any chromosome can reach under `encoding`.
    ///
    /// Dynamic programming over subsets of used gene values, filling slots
    /// in order: `O(2^N * N)` for `N` slots. Returns `None` when the table
    /// has more than [`MAX_EXACT_SLOTS`] slots or too few use columns for
    /// the encoding.
    pub fn best_score(&self, encoding: Encoding) -> Option<u32> {
        let universe = self.slot_count();
        if universe > MAX_EXACT_SLOTS || self.use_count < encoding.required_uses(universe) {
            return None;
        }
        let genes = encoding.gene_count(universe);

        // best[mask]: top score of slots 0..popcount(mask) using the values in mask.
        let mut best: Vec<Option<u32>> = vec![None; 1 << universe];
        best[0] = Some(0);
        let mut top = None;
        for mask in 0..best.len() {
            let Some(score) = best[mask] else { continue };
            let slot = mask.count_ones() as usize;
            if slot == genes {
                top = top.max(Some(score));
                continue;
            }
            for gene in (0..universe).filter(|g| mask & (1 << g) == 0) {
                let next = mask | (1 << gene);
                let candidate = score + encoding.score(self, slot, gene);
                best[next] = best[next].max(Some(candidate));
            }
        }
        top
    }
}

/// Largest slot count [`SuitabilityTable::best_score`] solves exactly.
pub const MAX_EXACT_SLOTS: usize = 20;

impl Default for SuitabilityTable {
    fn default() -> Self {
        Self::buildings()
    }
}

impl TryFrom<Vec<Vec<u32>>> for SuitabilityTable {
    type Error = Error;

    fn try_from(scores: Vec<Vec<u32>>) -> Result<Self> {
        Self::new(scores)
    }
}

impl From<SuitabilityTable> for Vec<Vec<u32>> {
    fn from(table: SuitabilityTable) -> Self {
        table.scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buildings_dimensions() {
        let table = SuitabilityTable::buildings();
        assert_eq!(table.slot_count(), 8);
        assert_eq!(table.use_count(), 7);
        assert_eq!(table.score(0, 0), 35);
        assert_eq!(table.score(7, 6), 33);
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = SuitabilityTable::new(vec![]).unwrap_err();
        match err {
            Error::InvalidConfig(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::EmptyTable);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(SuitabilityTable::new(vec![vec![]]).is_err());
    }

    #[test]
    fn test_ragged_table_rejected() {
        let err = SuitabilityTable::new(vec![vec![1, 2], vec![3], vec![4, 5]]).unwrap_err();
        match err {
            Error::InvalidConfig(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ValidationErrorKind::RaggedTable);
                assert!(errors[0].message.contains("Slot 1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_upper_bound_partial_skips_last_slot() {
        let table = SuitabilityTable::buildings();
        // Partial encoding scores slots 0..7 only.
        assert_eq!(table.upper_bound(Encoding::Partial), 35 + 30 + 37 + 34 + 37 + 25 + 30);
    }

    #[test]
    fn test_upper_bound_full() {
        let table = SuitabilityTable::new(vec![vec![1, 9], vec![4, 2]]).unwrap();
        assert_eq!(table.upper_bound(Encoding::Full), 13);
    }

    #[test]
    fn test_best_score_buildings() {
        let table = SuitabilityTable::buildings();
        // Row maxima collide on shared uses, so the optimum sits below 228.
        assert_eq!(table.best_score(Encoding::Partial), Some(222));
        assert!(table.best_score(Encoding::Partial).unwrap() < table.upper_bound(Encoding::Partial));
        // Too few columns for a full permutation.
        assert_eq!(table.best_score(Encoding::Full), None);
    }

    #[test]
    fn test_best_score_colliding_maxima() {
        let table = SuitabilityTable::new(vec![vec![9, 1], vec![8, 1]]).unwrap();
        assert_eq!(table.upper_bound(Encoding::Full), 17);
        assert_eq!(table.best_score(Encoding::Full), Some(10));

        let distinct = SuitabilityTable::new(vec![vec![1, 9], vec![4, 2]]).unwrap();
        assert_eq!(distinct.best_score(Encoding::Full), Some(13));
    }

    #[test]
    fn test_deserialize_rejects_ragged() {
        let parsed: std::result::Result<SuitabilityTable, _> =
            serde_json::from_str("[[1, 2], [3]]");
        assert!(parsed.is_err());

        let table: SuitabilityTable = serde_json::from_str("[[1, 2], [3, 4]]").unwrap();
        assert_eq!(table.score(1, 0), 3);
    }
}
