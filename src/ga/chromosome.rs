//! Permutation chromosome for slot assignment.
//!
//! # Encoding
//!
//! Gene position `i` is slot `i`; the gene value selects the use placed
//! there according to the run's [`Encoding`]. Values are distinct and
//! drawn from `[0, N)` where `N` is the table's slot count.
//!
//! Fitness is evaluated once at construction. Genes never change after a
//! chromosome is built, so the cached value is always current, including
//! a genuine zero.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Encoding, Gene, SuitabilityTable};

/// One candidate assignment.
///
/// Higher fitness = better assignment (maximization convention).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    genes: Vec<Gene>,
    generation: usize,
    parents: Option<Lineage>,
    fitness: u32,
}

/// The two parents an offspring was bred from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineage {
    pub first: Ancestor,
    pub second: Ancestor,
}

/// Snapshot of a parent at breeding time.
///
/// Holds copies, not references, so lineage never keeps a previous
/// population alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ancestor {
    /// Generation the parent was created in.
    pub generation: usize,
    /// Index of the parent within its population.
    pub position: usize,
    pub genes: Vec<Gene>,
    pub fitness: u32,
}

impl Chromosome {
    /// Creates a founder (generation 0) from explicit genes.
    ///
    /// # Errors
    /// [`Error::InvalidPermutation`] if `genes` is not a valid layout for
    /// `encoding` over `table`.
    pub fn from_genes(
        genes: Vec<Gene>,
        encoding: Encoding,
        table: &SuitabilityTable,
    ) -> Result<Self> {
        validate_genes(&genes, encoding, table.slot_count())?;
        Ok(Self::assemble(genes, 0, None, encoding, table))
    }

    /// Builds a chromosome from genes already known to be valid.
    pub(crate) fn assemble(
        genes: Vec<Gene>,
        generation: usize,
        parents: Option<Lineage>,
        encoding: Encoding,
        table: &SuitabilityTable,
    ) -> Self {
        debug_assert!(validate_genes(&genes, encoding, table.slot_count()).is_ok());
        let fitness = evaluate(&genes, encoding, table);
        Self {
            genes,
            generation,
            parents,
            fitness,
        }
    }

    /// Gene values by slot.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// Generation this chromosome was created in.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Parents, `None` for founders.
    pub fn parents(&self) -> Option<&Lineage> {
        self.parents.as_ref()
    }

    /// Total suitability score.
    pub fn fitness(&self) -> u32 {
        self.fitness
    }

    /// Use assigned to each slot, `None` where the slot is unassigned.
    pub fn assignments(&self, encoding: Encoding) -> Vec<Option<usize>> {
        self.genes.iter().map(|&g| encoding.use_of(g)).collect()
    }

    /// Snapshot used as lineage by offspring.
    pub(crate) fn as_ancestor(&self, position: usize) -> Ancestor {
        Ancestor {
            generation: self.generation,
            position,
            genes: self.genes.clone(),
            fitness: self.fitness,
        }
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_genes(f, &self.genes)
    }
}

impl fmt::Display for Ancestor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_genes(f, &self.genes)
    }
}

fn write_genes(f: &mut fmt::Formatter<'_>, genes: &[Gene]) -> fmt::Result {
    for gene in genes {
        write!(f, "{gene}")?;
    }
    Ok(())
}

/// Sums the table score of every slot's gene.
pub fn evaluate(genes: &[Gene], encoding: Encoding, table: &SuitabilityTable) -> u32 {
    genes
        .iter()
        .enumerate()
        .map(|(slot, &gene)| encoding.score(table, slot, gene))
        .sum()
}

/// Checks that `genes` are distinct values in `[0, slot_count)` with the
/// length `encoding` requires.
pub fn validate_genes(genes: &[Gene], encoding: Encoding, slot_count: usize) -> Result<()> {
    let invalid = |reason: String| Error::InvalidPermutation {
        genes: genes.to_vec(),
        reason,
    };

    let expected = encoding.gene_count(slot_count);
    if genes.len() != expected {
        return Err(invalid(format!(
            "expected {expected} genes, found {}",
            genes.len()
        )));
    }

    let mut seen = HashSet::with_capacity(genes.len());
    for &gene in genes {
        if gene >= slot_count {
            return Err(invalid(format!("gene {gene} outside [0, {slot_count})")));
        }
        if !seen.insert(gene) {
            return Err(invalid(format!("gene {gene} appears more than once")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_is_literal_table_sum() {
        let table = SuitabilityTable::buildings();
        let genes = vec![1, 2, 3, 4, 5, 6, 7];
        let ch = Chromosome::from_genes(genes, Encoding::Partial, &table).unwrap();

        // Slot i holds use i, the diagonal of the table.
        let expected = 35 + 14 + 21 + 26 + 15 + 20 + 19;
        assert_eq!(ch.fitness(), expected);
        assert_eq!(ch.fitness(), ch.fitness());
        assert_eq!(evaluate(ch.genes(), Encoding::Partial, &table), expected);
    }

    #[test]
    fn test_sentinel_contributes_zero() {
        let table = SuitabilityTable::buildings();
        let with_gap = Chromosome::from_genes(vec![0, 2, 3, 4, 5, 6, 7], Encoding::Partial, &table)
            .unwrap();
        assert_eq!(with_gap.fitness(), 14 + 21 + 26 + 15 + 20 + 19);
        assert_eq!(with_gap.assignments(Encoding::Partial)[0], None);
        assert_eq!(with_gap.assignments(Encoding::Partial)[1], Some(1));
    }

    #[test]
    fn test_zero_fitness_is_cached() {
        let table = SuitabilityTable::new(vec![vec![0, 0], vec![0, 0]]).unwrap();
        let ch = Chromosome::from_genes(vec![1, 0], Encoding::Full, &table).unwrap();
        assert_eq!(ch.fitness(), 0);
        assert_eq!(ch.fitness(), 0);
    }

    #[test]
    fn test_display_concatenates_genes() {
        let table = SuitabilityTable::buildings();
        let ch = Chromosome::from_genes(vec![7, 0, 3, 1, 2, 6, 5], Encoding::Partial, &table)
            .unwrap();
        assert_eq!(ch.to_string(), "7031265");
        assert_eq!(ch.generation(), 0);
        assert!(ch.parents().is_none());
    }

    #[test]
    fn test_invalid_genes() {
        let table = SuitabilityTable::buildings();
        // Wrong length
        assert!(Chromosome::from_genes(vec![1, 2, 3], Encoding::Partial, &table).is_err());
        // Duplicate
        let dup = Chromosome::from_genes(vec![1, 1, 2, 3, 4, 5, 6], Encoding::Partial, &table);
        assert!(matches!(dup, Err(Error::InvalidPermutation { .. })));
        // Out of range
        let range = validate_genes(&[1, 2, 3, 4, 5, 6, 8], Encoding::Partial, 8);
        assert!(range.unwrap_err().to_string().contains("outside"));
    }

    #[test]
    fn test_ancestor_snapshot() {
        let table = SuitabilityTable::buildings();
        let ch = Chromosome::from_genes(vec![1, 2, 3, 4, 5, 6, 7], Encoding::Partial, &table)
            .unwrap();
        let ancestor = ch.as_ancestor(3);
        assert_eq!(ancestor.position, 3);
        assert_eq!(ancestor.fitness, ch.fitness());
        assert_eq!(ancestor.to_string(), "1234567");
    }
}
