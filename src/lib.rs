//! Genetic-algorithm optimizer for slot-to-use assignment.
//!
//! Searches for an assignment of uses to slots that maximizes the total
//! score of a fixed suitability table. Candidate assignments are
//! permutations; breeding operators never break the permutation.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `SuitabilityTable`, `Encoding`, `Gene`
//! - **`ga`**: Chromosome, operators, roulette selection, population and
//!   the generational `GaRunner`
//! - **`config`**: `GaConfig` and TOML loading
//! - **`validation`**: Configuration integrity checks
//!
//! # Example
//!
//! ```
//! use u_assign::config::GaConfig;
//! use u_assign::ga::{GaRunner, StopReason};
//!
//! let config = GaConfig::default().with_stagnation_limit(25).with_seed(1);
//! let result = GaRunner::from_config(&config)?.run(&mut config.rng())?;
//! assert_eq!(result.stop_reason, StopReason::Stagnated);
//! # Ok::<(), u_assign::error::Error>(())
//! ```
//!
//! # References
//!
//! - Holland (1975), "Adaptation in Natural and Artificial Systems"
//! - Goldberg (1989), "Genetic Algorithms in Search, Optimization and Machine Learning"

pub mod config;
pub mod error;
pub mod ga;
pub mod models;
pub mod validation;

pub use error::{Error, Result};
