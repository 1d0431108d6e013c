//! GA-based slot assignment.
//!
//! Chromosomes are permutations of use indices over slots. Offspring are
//! bred by rotation crossover and a single swap-mutation pass, parents
//! are drawn by roulette wheel, and whole generations are replaced until
//! a [`Termination`] rule fires.
//!
//! # Submodules
//!
//! - [`operators`]: Permutation-preserving crossover and mutation
//! - [`problem`]: Founders, evaluation and breeding for one table
//! - [`selection`]: Roulette-wheel parent selection
//!
//! # Reference
//! Holland (1975), "Adaptation in Natural and Artificial Systems"

mod chromosome;
pub mod operators;
mod population;
pub mod problem;
mod runner;
pub mod selection;
mod termination;

pub use chromosome::{evaluate, validate_genes, Ancestor, Chromosome, Lineage};
pub use operators::{crossover_at, rotation_crossover, swap_mutation};
pub use population::Population;
pub use problem::AssignmentProblem;
pub use runner::{EvolutionResult, GaRunner, GenerationReport};
pub use selection::{RouletteWheel, SecondParentDraw};
pub use termination::{Progress, StopReason, Termination};
