//! Input validation for optimizer runs.
//!
//! Checks a [`GaConfig`] for structural problems before any chromosome is
//! built. Detects:
//! - Tables too narrow for the chosen encoding
//! - Populations too small to draw two distinct parents
//! - Probabilities outside `[0, 1]`
//! - Runs that could never terminate

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GaConfig;
use crate::ga::Termination;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// The suitability table has no rows or no columns.
    EmptyTable,
    /// Rows of the suitability table differ in length.
    RaggedTable,
    /// The table has fewer use columns than the encoding addresses.
    InsufficientUses,
    /// The encoding yields chromosomes with no genes.
    TooFewSlots,
    /// Population cannot supply two distinct parents.
    PopulationTooSmall,
    /// A probability lies outside `[0, 1]`.
    RateOutOfRange,
    /// Roulette redraw budget is zero.
    InvalidRedrawLimit,
    /// A fitness target is unreachable (or unprovable) and no generation
    /// cap is set.
    UnboundedRun,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a run configuration.
///
/// Checks:
/// 1. The table has enough use columns for the encoding
/// 2. Chromosomes have at least one gene
/// 3. Population size is at least 2
/// 4. Mutation rate is a finite value in `[0, 1]`
/// 5. The roulette redraw budget is at least 1
/// 6. A fitness target above the best reachable score has a generation cap
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_config(config: &GaConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let table = &config.suitability;
    let slots = table.slot_count();

    let required = config.encoding.required_uses(slots);
    if table.use_count() < required {
        errors.push(ValidationError::new(
            ValidationErrorKind::InsufficientUses,
            format!(
                "{:?} encoding over {} slots needs {} use columns, table has {}",
                config.encoding,
                slots,
                required,
                table.use_count()
            ),
        ));
    }

    if config.encoding.gene_count(slots) == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooFewSlots,
            format!("{:?} encoding over {} slots has no genes", config.encoding, slots),
        ));
    }

    if config.population_size < 2 {
        errors.push(ValidationError::new(
            ValidationErrorKind::PopulationTooSmall,
            format!(
                "Population size {} cannot supply two distinct parents",
                config.population_size
            ),
        ));
    }

    if !(0.0..=1.0).contains(&config.mutation_rate) {
        errors.push(ValidationError::new(
            ValidationErrorKind::RateOutOfRange,
            format!("Mutation rate {} is outside [0, 1]", config.mutation_rate),
        ));
    }

    if config.max_redraws == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidRedrawLimit,
            "Roulette redraw limit must be at least 1",
        ));
    }

    if let (Termination::TargetFitness { target }, None) = (config.termination, config.max_generations) {
        match table.best_score(config.encoding) {
            Some(best) if target <= best => {}
            Some(best) => errors.push(ValidationError::new(
                ValidationErrorKind::UnboundedRun,
                format!(
                    "Target fitness {target} exceeds the best reachable score {best} and no generation cap is set"
                ),
            )),
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnboundedRun,
                format!(
                    "Target fitness {target} cannot be checked against a {}-slot table without a generation cap",
                    table.slot_count()
                ),
            )),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
