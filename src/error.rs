//! Error types for optimizer runs.

use crate::models::Gene;
use crate::validation::ValidationError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that end an optimizer run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every member of the population (or of the remaining candidates)
    /// scores zero, so selection probabilities are undefined.
    #[error("DegeneratePopulation: total fitness of {size} candidates is zero")]
    DegeneratePopulation { size: usize },
    /// The roulette walk ran past the last candidate on every attempt.
    #[error("SelectionExhausted: no candidate selected after {attempts} draws over {candidates} candidates")]
    SelectionExhausted { attempts: usize, candidates: usize },
    /// Genes are not distinct values of the expected range and length.
    #[error("InvalidPermutation: {genes:?} ({reason})")]
    InvalidPermutation { genes: Vec<Gene>, reason: String },
    #[error("InvalidConfig: {}", format_validation(.0))]
    InvalidConfig(Vec<ValidationError>),
    #[error("Io: {0}")]
    Io(#[from] std::io::Error),
    #[error("Toml: {0}")]
    Toml(#[from] toml::de::Error),
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Error::InvalidConfig(errors)
    }
}
