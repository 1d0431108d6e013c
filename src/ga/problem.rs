//! Slot-assignment GA problem definition.
//!
//! Bridges the suitability table and encoding to the chromosome
//! operators: founders, evaluation, crossover, mutation and breeding.

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use super::chromosome::{evaluate, Chromosome, Lineage};
use super::operators::{rotation_crossover, swap_mutation};
use crate::config::GaConfig;
use crate::models::{Encoding, Gene, SuitabilityTable};

/// Per-position swap probability used by the original building study.
pub const DEFAULT_MUTATION_RATE: f64 = 0.5;

/// GA problem definition for slot assignment.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_assign::ga::AssignmentProblem;
/// use u_assign::models::{Encoding, SuitabilityTable};
///
/// let problem = AssignmentProblem::new(SuitabilityTable::buildings(), Encoding::Partial);
/// let mut rng = StdRng::seed_from_u64(7);
/// let founder = problem.create_individual(&mut rng);
/// assert_eq!(founder.genes().len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct AssignmentProblem {
    /// Scores for every (slot, use) pair.
    pub table: SuitabilityTable,
    /// Chromosome layout.
    pub encoding: Encoding,
    /// Per-position swap flag probability (default: 0.5).
    pub mutation_rate: f64,
}

impl AssignmentProblem {
    /// Creates a problem over `table` using `encoding`.
    pub fn new(table: SuitabilityTable, encoding: Encoding) -> Self {
        Self {
            table,
            encoding,
            mutation_rate: DEFAULT_MUTATION_RATE,
        }
    }

    /// Creates a problem from a run configuration.
    pub fn from_config(config: &GaConfig) -> Self {
        Self::new(config.suitability.clone(), config.encoding)
            .with_mutation_rate(config.mutation_rate)
    }

    /// Sets the mutation rate (clamped to `[0, 1]`).
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Number of distinct gene values (`N`).
    pub fn universe(&self) -> usize {
        self.table.slot_count()
    }

    /// Chromosome length.
    pub fn gene_count(&self) -> usize {
        self.encoding.gene_count(self.universe())
    }

    /// Creates a random founder: distinct values sampled from `[0, N)`.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> Chromosome {
        let mut genes: Vec<Gene> = (0..self.universe()).collect();
        genes.shuffle(rng);
        genes.truncate(self.gene_count());
        Chromosome::assemble(genes, 0, None, self.encoding, &self.table)
    }

    /// Fitness of a gene sequence.
    pub fn evaluate(&self, genes: &[Gene]) -> u32 {
        evaluate(genes, self.encoding, &self.table)
    }

    /// Child genes from rotation crossover of two parents.
    pub fn crossover<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Vec<Gene> {
        rotation_crossover(parent1.genes(), parent2.genes(), self.universe(), rng)
    }

    /// One swap-mutation pass over `genes`.
    pub fn mutate<R: Rng>(&self, genes: &mut [Gene], rng: &mut R) -> Option<(usize, usize)> {
        swap_mutation(genes, self.mutation_rate, rng)
    }

    /// Breeds one offspring: crossover, then a single mutation pass.
    ///
    /// `positions` are the parents' indices within their population and
    /// are recorded in the offspring's lineage.
    pub fn breed<R: Rng>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        positions: (usize, usize),
        rng: &mut R,
    ) -> Chromosome {
        let mut genes = self.crossover(parent1, parent2, rng);
        if let Some((a, b)) = self.mutate(&mut genes, rng) {
            debug!("Mutation swapped positions {a} and {b}");
        }

        let lineage = Lineage {
            first: parent1.as_ancestor(positions.0),
            second: parent2.as_ancestor(positions.1),
        };
        Chromosome::assemble(
            genes,
            parent1.generation() + 1,
            Some(lineage),
            self.encoding,
            &self.table,
        )
    }
}
