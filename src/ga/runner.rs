//! Generational evolution loop.
//!
//! # Algorithm
//!
//! 1. Build `population_size` random founders (generation 0).
//! 2. Record the fittest member; it replaces the best-ever solution only
//!    on a strict improvement, which also resets the stagnation counter.
//!    Otherwise the counter increments.
//! 3. Report the generation and check the termination rule and cap.
//! 4. Breed a full replacement population, one offspring per pair of
//!    distinct roulette-selected parents, and continue at step 2.
//!
//! Every generation is complete before the next is bred, so selection
//! always sees a fixed population snapshot.

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::chromosome::Chromosome;
use super::population::Population;
use super::problem::AssignmentProblem;
use super::selection::RouletteWheel;
use super::termination::{Progress, StopReason, Termination};
use crate::config::GaConfig;
use crate::error::{Error, Result};
use crate::validation::validate_config;

/// Per-generation progress snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: usize,
    /// Genes of the generation's fittest member as a digit string.
    pub best: String,
    pub best_fitness: u32,
    pub best_ever_fitness: u32,
    pub mean_fitness: f64,
    pub stagnation: usize,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best chromosome seen in any generation.
    pub best: Chromosome,
    /// Generation the run stopped at.
    pub final_generation: usize,
    pub stop_reason: StopReason,
    /// One report per evaluated generation, founders first.
    pub history: Vec<GenerationReport>,
}

/// Drives a GA run from founders to termination.
///
/// # Example
/// ```
/// use u_assign::config::GaConfig;
/// use u_assign::ga::GaRunner;
///
/// let config = GaConfig::default().with_stagnation_limit(10).with_seed(42);
/// let runner = GaRunner::from_config(&config).unwrap();
/// let result = runner.run(&mut config.rng()).unwrap();
/// assert!(result.best.fitness() > 0);
/// ```
#[derive(Debug, Clone)]
pub struct GaRunner {
    pub problem: AssignmentProblem,
    pub selector: RouletteWheel,
    pub population_size: usize,
    pub termination: Termination,
    pub max_generations: Option<usize>,
}

impl GaRunner {
    /// Builds a runner from a validated configuration.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] with every validation failure.
    pub fn from_config(config: &GaConfig) -> Result<Self> {
        validate_config(config)?;
        Ok(Self {
            problem: AssignmentProblem::from_config(config),
            selector: RouletteWheel::from_config(config),
            population_size: config.population_size,
            termination: config.termination,
            max_generations: config.max_generations,
        })
    }

    /// Runs to termination, logging each generation.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<EvolutionResult> {
        self.run_with(rng, |_| {})
    }

    /// Runs to termination, passing each generation's report to
    /// `on_generation` as soon as it is evaluated.
    ///
    /// # Errors
    /// Propagates selection failures ([`Error::DegeneratePopulation`],
    /// [`Error::SelectionExhausted`]); both end the run.
    pub fn run_with<R, F>(&self, rng: &mut R, mut on_generation: F) -> Result<EvolutionResult>
    where
        R: Rng,
        F: FnMut(&GenerationReport),
    {
        if let (Termination::TargetFitness { target }, None) = (self.termination, self.max_generations) {
            match self.problem.table.best_score(self.problem.encoding) {
                Some(best) if target > best => {
                    warn!("Target fitness {target} exceeds best reachable score {best}; run will not terminate");
                }
                None => warn!("Target fitness {target} is unchecked and uncapped; run may not terminate"),
                Some(_) => {}
            }
        }

        info!(
            "Initializing population of size {} ({:?} encoding, {} genes)",
            self.population_size,
            self.problem.encoding,
            self.problem.gene_count()
        );
        let mut population = Population::random(&self.problem, self.population_size, rng);
        let mut generation = 0;
        let mut stagnation = 0;
        let mut best_ever = fittest(&population)?.clone();
        let mut history = Vec::new();

        let stop_reason = loop {
            let best = fittest(&population)?;
            let report = GenerationReport {
                generation,
                best: best.to_string(),
                best_fitness: best.fitness(),
                best_ever_fitness: best_ever.fitness(),
                mean_fitness: population.mean_fitness(),
                stagnation,
            };
            info!(
                "Generation {}: best {} fitness {} | best ever {} | mean {:.1} | stagnation {}",
                report.generation,
                report.best,
                report.best_fitness,
                report.best_ever_fitness,
                report.mean_fitness,
                report.stagnation
            );
            on_generation(&report);
            history.push(report);

            let progress = Progress {
                population: &population,
                stagnation,
            };
            if let Some(reason) = self.termination.check(&progress) {
                break reason;
            }
            if self.max_generations.is_some_and(|cap| generation >= cap) {
                break StopReason::GenerationLimit;
            }

            population = population.breed(&self.problem, &self.selector, self.population_size, rng)?;
            generation += 1;

            let candidate = fittest(&population)?;
            if candidate.fitness() > best_ever.fitness() {
                best_ever = candidate.clone();
                stagnation = 0;
            } else {
                stagnation += 1;
            }
        };

        info!(
            "Evolution complete after generation {generation} ({stop_reason:?}): best {} fitness {} from generation {}",
            best_ever,
            best_ever.fitness(),
            best_ever.generation()
        );

        Ok(EvolutionResult {
            best: best_ever,
            final_generation: generation,
            stop_reason,
            history,
        })
    }
}

fn fittest(population: &Population) -> Result<&Chromosome> {
    population
        .fittest()
        .ok_or(Error::DegeneratePopulation { size: 0 })
}
