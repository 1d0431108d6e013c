//! Roulette-wheel parent selection.
//!
//! Each candidate occupies a slice of the wheel proportional to its
//! selection probability. A spin draws `u` uniformly from `[0, mass)` and
//! walks the cumulative probabilities in order, returning the first
//! candidate whose cumulative sum reaches `u`.
//!
//! Parent pairs are drawn without replacement: the first parent is taken
//! off the wheel before the second spin.
//!
//! # Reference
//! Goldberg (1989), "Genetic Algorithms in Search, Optimization and
//! Machine Learning", Ch. 1

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GaConfig;
use crate::error::{Error, Result};

/// Default number of spins before a draw is declared exhausted.
pub const DEFAULT_MAX_REDRAWS: usize = 100;

/// How the second parent's spin is scaled once the first parent is
/// removed from the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecondParentDraw {
    /// Spin over `[0, 1)` against the remaining, unscaled probabilities.
    /// A spin landing in the removed parent's share misses and is redrawn.
    ///
    /// A miss happens with probability equal to the first parent's share,
    /// so a member holding share `p` fails every spin of a draw with
    /// probability `p^max_redraws`. With one member near 97% of total
    /// fitness and 100 spins that is about 5%, and the run ends with
    /// [`Error::SelectionExhausted`]. Use `Renormalized` or raise
    /// `max_redraws` for populations dominated by one member.
    #[default]
    Unnormalized,
    /// Spin over `[0, remaining mass)`, so every spin selects someone.
    Renormalized,
}

/// Roulette-wheel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouletteWheel {
    /// Scaling of the second parent's spin.
    pub second_parent: SecondParentDraw,
    /// Spins attempted before giving up on a draw.
    pub max_redraws: usize,
}

impl Default for RouletteWheel {
    fn default() -> Self {
        Self {
            second_parent: SecondParentDraw::Unnormalized,
            max_redraws: DEFAULT_MAX_REDRAWS,
        }
    }
}

impl RouletteWheel {
    /// Creates a selector from a run configuration.
    pub fn from_config(config: &GaConfig) -> Self {
        Self {
            second_parent: config.second_parent,
            max_redraws: config.max_redraws,
        }
    }

    /// Spins the wheel once.
    ///
    /// `candidates` are `(probability, member)` pairs. Returns `None` when
    /// the cumulative probability never reaches the drawn value.
    /// Zero-probability candidates are never returned.
    pub fn spin<R: Rng>(candidates: &[(f64, usize)], mass: f64, rng: &mut R) -> Option<usize> {
        let u = rng.random::<f64>() * mass;
        let mut cumulative = 0.0;
        for &(probability, member) in candidates {
            cumulative += probability;
            if probability > 0.0 && cumulative >= u {
                return Some(member);
            }
        }
        None
    }

    /// Draws one member, respinning up to `max_redraws` times.
    ///
    /// # Errors
    /// [`Error::SelectionExhausted`] if no spin selects a candidate.
    pub fn draw<R: Rng>(&self, candidates: &[(f64, usize)], mass: f64, rng: &mut R) -> Result<usize> {
        for attempt in 1..=self.max_redraws {
            if let Some(member) = Self::spin(candidates, mass, rng) {
                if attempt > 1 {
                    debug!("Roulette selected member {member} on spin {attempt}");
                }
                return Ok(member);
            }
        }
        Err(Error::SelectionExhausted {
            attempts: self.max_redraws,
            candidates: candidates.len(),
        })
    }

    /// Draws two distinct members.
    ///
    /// `probabilities[i]` is member `i`'s selection probability; the
    /// values are expected to sum to 1.
    ///
    /// # Errors
    /// - [`Error::DegeneratePopulation`] if the wheel (or what remains of
    ///   it after the first draw) has no probability mass.
    /// - [`Error::SelectionExhausted`] if a draw fails every spin.
    pub fn select_pair<R: Rng>(&self, probabilities: &[f64], rng: &mut R) -> Result<(usize, usize)> {
        let mut candidates: Vec<(f64, usize)> = probabilities
            .iter()
            .enumerate()
            .map(|(member, &p)| (p, member))
            .collect();

        let first = self.draw_from(&candidates, rng)?;
        candidates.retain(|&(_, member)| member != first);
        let second = self.draw_from(&candidates, rng)?;

        Ok((first, second))
    }

    fn draw_from<R: Rng>(&self, candidates: &[(f64, usize)], rng: &mut R) -> Result<usize> {
        let remaining: f64 = candidates.iter().map(|&(p, _)| p).sum();
        if remaining <= 0.0 {
            return Err(Error::DegeneratePopulation {
                size: candidates.len(),
            });
        }

        let mass = match self.second_parent {
            SecondParentDraw::Unnormalized => 1.0,
            SecondParentDraw::Renormalized => remaining,
        };
        self.draw(candidates, mass, rng)
    }
}
