//! Fixed-size generation of chromosomes.
//!
//! A population caches its total fitness and every member's selection
//! probability when it is built. A new population is built each
//! generation, so cached probabilities never outlive the members they
//! were computed from.

use rand::Rng;

use super::chromosome::Chromosome;
use super::problem::AssignmentProblem;
use super::selection::RouletteWheel;
use crate::error::{Error, Result};

/// One generation of chromosomes.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Chromosome>,
    total_fitness: u64,
    /// `None` when total fitness is zero.
    probabilities: Option<Vec<f64>>,
}

impl Population {
    /// Wraps `members` and computes their selection probabilities.
    pub fn new(members: Vec<Chromosome>) -> Self {
        let total_fitness: u64 = members.iter().map(|c| u64::from(c.fitness())).sum();
        let probabilities = (total_fitness > 0).then(|| {
            members
                .iter()
                .map(|c| f64::from(c.fitness()) / total_fitness as f64)
                .collect()
        });
        Self {
            members,
            total_fitness,
            probabilities,
        }
    }

    /// Creates `size` random founders.
    pub fn random<R: Rng>(problem: &AssignmentProblem, size: usize, rng: &mut R) -> Self {
        Self::new((0..size).map(|_| problem.create_individual(rng)).collect())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Chromosome] {
        &self.members
    }

    /// Sum of every member's fitness.
    pub fn total_fitness(&self) -> u64 {
        self.total_fitness
    }

    /// Mean member fitness, 0 for an empty population.
    pub fn mean_fitness(&self) -> f64 {
        if self.members.is_empty() {
            0.0
        } else {
            self.total_fitness as f64 / self.members.len() as f64
        }
    }

    /// Selection probability of every member, in member order.
    ///
    /// # Errors
    /// [`Error::DegeneratePopulation`] if total fitness is zero.
    pub fn probabilities(&self) -> Result<&[f64]> {
        self.probabilities
            .as_deref()
            .ok_or(Error::DegeneratePopulation {
                size: self.members.len(),
            })
    }

    /// Selection probability of the member at `index`:
    /// `fitness / total_fitness`.
    ///
    /// # Errors
    /// [`Error::DegeneratePopulation`] if total fitness is zero.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn probability(&self, index: usize) -> Result<f64> {
        Ok(self.probabilities()?[index])
    }

    /// Fittest member; the earliest one wins ties.
    pub fn fittest(&self) -> Option<&Chromosome> {
        self.members
            .iter()
            .reduce(|best, c| if c.fitness() > best.fitness() { c } else { best })
    }

    /// Whether any member has at least `target` fitness.
    pub fn reaches(&self, target: u32) -> bool {
        self.members.iter().any(|c| c.fitness() >= target)
    }

    /// Breeds the next generation of `size` offspring.
    ///
    /// Each offspring comes from its own pair of distinct parents drawn
    /// by `selector`.
    ///
    /// # Errors
    /// Propagates [`Error::DegeneratePopulation`] and
    /// [`Error::SelectionExhausted`] from selection.
    pub fn breed<R: Rng>(
        &self,
        problem: &AssignmentProblem,
        selector: &RouletteWheel,
        size: usize,
        rng: &mut R,
    ) -> Result<Population> {
        let probabilities = self.probabilities()?;
        let mut offspring = Vec::with_capacity(size);

        while offspring.len() < size {
            let (a, b) = selector.select_pair(probabilities, rng)?;
            offspring.push(problem.breed(&self.members[a], &self.members[b], (a, b), rng));
        }

        Ok(Population::new(offspring))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Encoding, SuitabilityTable};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn problem() -> AssignmentProblem {
        AssignmentProblem::new(SuitabilityTable::buildings(), Encoding::Partial)
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let mut rng = SmallRng::seed_from_u64(42);
        for size in [1, 2, 10, 37] {
            let population = Population::random(&problem(), size, &mut rng);
            let sum: f64 = population.probabilities().unwrap().iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "sum {sum} for size {size}");
        }
    }

    #[test]
    fn test_probability_matches_fitness_share() {
        let mut rng = SmallRng::seed_from_u64(42);
        let population = Population::random(&problem(), 10, &mut rng);
        let total = population.total_fitness() as f64;
        for (i, member) in population.members().iter().enumerate() {
            let expected = f64::from(member.fitness()) / total;
            assert_eq!(population.probability(i).unwrap(), expected);
        }
    }

    #[test]
    fn test_degenerate_population() {
        let table = SuitabilityTable::new(vec![vec![0; 3]; 3]).unwrap();
        let problem = AssignmentProblem::new(table, Encoding::Full);
        let mut rng = SmallRng::seed_from_u64(42);
        let population = Population::random(&problem, 4, &mut rng);

        assert_eq!(population.total_fitness(), 0);
        assert!(matches!(
            population.probability(0),
            Err(Error::DegeneratePopulation { size: 4 })
        ));
        let selector = RouletteWheel::default();
        assert!(population.breed(&problem, &selector, 4, &mut rng).is_err());
    }

    #[test]
    fn test_fittest_prefers_earliest_on_ties() {
        let table = SuitabilityTable::buildings();
        let a = Chromosome::from_genes(vec![1, 2, 3, 4, 5, 6, 7], Encoding::Partial, &table).unwrap();
        let b = a.clone();
        let weaker = Chromosome::from_genes(vec![0, 2, 3, 4, 5, 6, 7], Encoding::Partial, &table)
            .unwrap();
        let population = Population::new(vec![weaker, a, b]);
        let best = population.fittest().unwrap();
        assert!(std::ptr::eq(best, &population.members()[1]));
        assert!(population.reaches(best.fitness()));
        assert!(!population.reaches(best.fitness() + 1));
    }

    #[test]
    fn test_breed_keeps_size_and_distinct_parents() {
        let problem = problem();
        let selector = RouletteWheel::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut population = Population::random(&problem, 10, &mut rng);

        for generation in 1..=20 {
            population = population.breed(&problem, &selector, 10, &mut rng).unwrap();
            assert_eq!(population.len(), 10);
            for child in population.members() {
                assert_eq!(child.generation(), generation);
                let lineage = child.parents().unwrap();
                assert_ne!(lineage.first.position, lineage.second.position);
            }
        }
    }

    #[test]
    fn test_mean_fitness() {
        assert_eq!(Population::new(vec![]).mean_fitness(), 0.0);
        let table = SuitabilityTable::new(vec![vec![2, 4], vec![6, 8]]).unwrap();
        let a = Chromosome::from_genes(vec![0, 1], Encoding::Full, &table).unwrap();
        let b = Chromosome::from_genes(vec![1, 0], Encoding::Full, &table).unwrap();
        // 2 + 8 and 4 + 6
        assert_eq!(Population::new(vec![a, b]).mean_fitness(), 10.0);
    }
}
