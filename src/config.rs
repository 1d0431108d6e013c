//! Run configuration.
//!
//! Every option has a default matching the original building study, so a
//! configuration file only needs the keys it changes:
//!
//! ```toml
//! population_size = 10
//! mutation_rate = 0.5
//! encoding = "partial"
//! max_generations = 1000
//! seed = 42
//!
//! [termination]
//! kind = "target_fitness"
//! target = 200
//! ```

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ga::problem::DEFAULT_MUTATION_RATE;
use crate::ga::selection::DEFAULT_MAX_REDRAWS;
use crate::ga::{SecondParentDraw, Termination};
use crate::models::{Encoding, SuitabilityTable};

/// Population size of the original building study.
pub const DEFAULT_POPULATION_SIZE: usize = 10;

/// Start-of-run options for the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Chromosomes per generation (default: 10).
    pub population_size: usize,
    /// Per-position swap flag probability (default: 0.5).
    pub mutation_rate: f64,
    /// Chromosome layout (default: partial).
    pub encoding: Encoding,
    /// Stop rule (default: stagnation, limit 100).
    pub termination: Termination,
    /// Optional hard cap on the generation number.
    pub max_generations: Option<usize>,
    /// Scaling of the second parent's roulette spin.
    pub second_parent: SecondParentDraw,
    /// Roulette spins attempted per draw (default: 100).
    pub max_redraws: usize,
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Slot x use scores (default: the 8x7 building table).
    pub suitability: SuitabilityTable,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            mutation_rate: DEFAULT_MUTATION_RATE,
            encoding: Encoding::default(),
            termination: Termination::default(),
            max_generations: None,
            second_parent: SecondParentDraw::default(),
            max_redraws: DEFAULT_MAX_REDRAWS,
            seed: None,
            suitability: SuitabilityTable::default(),
        }
    }
}

impl GaConfig {
    /// Loads a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// RNG for a run: seeded when `seed` is set, OS-seeded otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_termination(mut self, termination: Termination) -> Self {
        self.termination = termination;
        self
    }

    /// Shorthand for [`Termination::Stagnation`].
    pub fn with_stagnation_limit(self, limit: usize) -> Self {
        self.with_termination(Termination::Stagnation { limit })
    }

    pub fn with_max_generations(mut self, cap: usize) -> Self {
        self.max_generations = Some(cap);
        self
    }

    pub fn with_second_parent(mut self, draw: SecondParentDraw) -> Self {
        self.second_parent = draw;
        self
    }

    pub fn with_max_redraws(mut self, redraws: usize) -> Self {
        self.max_redraws = redraws;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_suitability(mut self, table: SuitabilityTable) -> Self {
        self.suitability = table;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rand::Rng;

    #[test]
    fn test_empty_toml_is_default() {
        let config = GaConfig::from_toml_str("").unwrap();
        assert_eq!(config, GaConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = GaConfig::from_toml_str(
            r#"
            population_size = 20
            mutation_rate = 0.1
            encoding = "full"
            max_generations = 500
            second_parent = "renormalized"
            max_redraws = 8
            seed = 42
            suitability = [[1, 2], [3, 4]]

            [termination]
            kind = "target_fitness"
            target = 6
            "#,
        )
        .unwrap();

        assert_eq!(config.population_size, 20);
        assert_eq!(config.mutation_rate, 0.1);
        assert_eq!(config.encoding, Encoding::Full);
        assert_eq!(config.max_generations, Some(500));
        assert_eq!(config.second_parent, SecondParentDraw::Renormalized);
        assert_eq!(config.max_redraws, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.suitability.score(1, 0), 3);
        assert_eq!(config.termination, Termination::TargetFitness { target: 6 });
    }

    #[test]
    fn test_ragged_table_is_parse_error() {
        let err = GaConfig::from_toml_str("suitability = [[1, 2], [3]]").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GaConfig::load(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = GaConfig::default().with_seed(5);
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = GaConfig::from_toml_str(include_str!("../config.toml")).unwrap();
        assert!(crate::validation::validate_config(&config).is_ok());
    }
}
