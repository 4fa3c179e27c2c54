//! Random number utilities.
//!
//! All stochastic decisions in the crate go through a seeded [`StdRng`] so
//! that runs are reproducible for a fixed seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Draws an index with probability proportional to its weight.
///
/// Uses cumulative-distribution inversion over a single uniform draw.
/// Entries with weight zero are never returned.
///
/// Returns `None` when the weights cannot form a distribution: empty
/// input, a total that is zero or not finite, or any negative or NaN
/// weight.
///
/// # Examples
///
/// ```
/// use u_antcolony::random::{create_rng, weighted_index};
///
/// let mut rng = create_rng(7);
/// let i = weighted_index(&[0.0, 3.0, 0.0], &mut rng);
/// assert_eq!(i, Some(1));
/// assert_eq!(weighted_index(&[0.0, 0.0], &mut rng), None);
/// ```
pub fn weighted_index<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    if weights.iter().any(|w| w.is_nan() || *w < 0.0) {
        return None;
    }

    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return Some(i);
        }
    }

    // floating-point fallback: last entry that carries mass
    weights.iter().rposition(|&w| w > 0.0)
}
