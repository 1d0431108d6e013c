//! Permutation-preserving genetic operators.
//!
//! - [`rotation_crossover`]: keeps a prefix of parent 1 and fills the rest
//!   from parent 2 rotated at the cut, then parent 1's suffix, skipping
//!   values already placed.
//! - [`swap_mutation`]: flags positions left to right at the mutation rate
//!   and swaps the first two flagged.
//!
//! Neither operator can introduce a duplicate or drop a value.

use rand::Rng;

use crate::models::Gene;

/// Performs rotation crossover at a random cut in `[0, universe]`.
///
/// `universe` is the number of distinct gene values (`N`). Partial
/// chromosomes hold `N - 1` genes, so cuts `N - 1` and `N` both copy
/// parent 1 whole.
pub fn rotation_crossover<R: Rng>(
    p1: &[Gene],
    p2: &[Gene],
    universe: usize,
    rng: &mut R,
) -> Vec<Gene> {
    crossover_at(p1, p2, random_cut(universe, rng), universe)
}

/// Uniform cut point in `[0, universe]`.
pub(crate) fn random_cut<R: Rng>(universe: usize, rng: &mut R) -> usize {
    rng.random_range(0..=universe)
}

/// Rotation crossover with an explicit cut.
///
/// The child starts with `p1[..cut]`. Candidates are then taken in the
/// order `p2[cut..]`, `p2[..cut]`, `p1[cut..]`, each appended unless
/// already present. If candidates run out, the missing values of
/// `[0, universe)` are appended in ascending order.
///
/// `cut` is clamped to `p1.len()`.
///
/// # Panics
/// If the parents differ in length or hold a value `>= universe`.
pub fn crossover_at(p1: &[Gene], p2: &[Gene], cut: usize, universe: usize) -> Vec<Gene> {
    assert_eq!(p1.len(), p2.len(), "parents must have equal length");
    let len = p1.len();
    let cut = cut.min(len);

    let mut present = vec![false; universe];
    let mut child = Vec::with_capacity(len);
    for &gene in &p1[..cut] {
        present[gene] = true;
        child.push(gene);
    }

    let pool = p2[cut..].iter().chain(&p2[..cut]).chain(&p1[cut..]);
    for &gene in pool {
        if child.len() == len {
            break;
        }
        if !present[gene] {
            present[gene] = true;
            child.push(gene);
        }
    }

    if child.len() < len {
        let missing = len - child.len();
        child.extend((0..universe).filter(|&g| !present[g]).take(missing));
    }
    child
}

/// Swap mutation: flags each position with probability `rate`, stopping
/// at two, and swaps the two flagged genes.
///
/// Returns the swapped positions, or `None` when fewer than two positions
/// were flagged.
pub fn swap_mutation<R: Rng>(genes: &mut [Gene], rate: f64, rng: &mut R) -> Option<(usize, usize)> {
    let mut flagged = Vec::with_capacity(2);
    for i in 0..genes.len() {
        if flagged.len() == 2 {
            break;
        }
        if rng.random::<f64>() < rate {
            flagged.push(i);
        }
    }

    match flagged[..] {
        [a, b] => {
            genes.swap(a, b);
            Some((a, b))
        }
        _ => None,
    }
}
