//! Stop rules for the generational loop.
//!
//! | Rule | Stops when |
//! |------|-----------|
//! | `Stagnation { limit }` | generations without a best-ever improvement exceed `limit` |
//! | `TargetFitness { target }` | any member of the current population reaches `target` |
//!
//! A generation cap (see [`GaConfig::max_generations`](crate::config::GaConfig))
//! applies on top of either rule.

use serde::{Deserialize, Serialize};

use super::population::Population;

/// Generations without improvement tolerated by default.
pub const DEFAULT_STAGNATION_LIMIT: usize = 100;

/// Termination rule, selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Termination {
    /// Stop once the stagnation counter exceeds `limit`.
    Stagnation { limit: usize },
    /// Stop once any member's fitness is at least `target`.
    TargetFitness { target: u32 },
}

impl Default for Termination {
    fn default() -> Self {
        Termination::Stagnation {
            limit: DEFAULT_STAGNATION_LIMIT,
        }
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The stagnation limit was exceeded.
    Stagnated,
    /// A member reached the target fitness.
    TargetReached,
    /// The generation cap was hit first.
    GenerationLimit,
}

/// Loop state a termination rule inspects after each generation.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// The generation just evaluated.
    pub population: &'a Population,
    /// Consecutive generations without a best-ever improvement.
    pub stagnation: usize,
}

impl Termination {
    /// Returns the stop reason if the rule fires for `progress`.
    pub fn check(&self, progress: &Progress<'_>) -> Option<StopReason> {
        match *self {
            Termination::Stagnation { limit } => {
                (progress.stagnation > limit).then_some(StopReason::Stagnated)
            }
            Termination::TargetFitness { target } => progress
                .population
                .reaches(target)
                .then_some(StopReason::TargetReached),
        }
    }
}
