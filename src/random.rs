//! Random number generation and weighted selection.
//!
//! The solver draws all of its randomness through this module so that a
//! fixed seed reproduces a solve exactly.

use crate::error::{LookaheadError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates an RNG from `seed`, or from fresh entropy when `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Normalizes `1 / cost` for each cost into a probability vector.
///
/// # Errors
/// [`LookaheadError::InvalidInput`] if any weight is negative or not
/// finite (a zero cost gives an infinite weight), or if the weights sum
/// to zero. NaN probabilities are never produced.
pub fn inverse_probabilities(costs: &[f64]) -> Result<Vec<f64>> {
    if costs.is_empty() {
        return Err(LookaheadError::invalid("no candidates to draw from"));
    }
    let weights: Vec<f64> = costs.iter().map(|&c| 1.0 / c).collect();
    if let Some(i) = weights.iter().position(|w| !w.is_finite() || *w < 0.0) {
        return Err(LookaheadError::invalid(format!(
            "cost {} of candidate {i} does not yield a valid weight",
            costs[i]
        )));
    }
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(LookaheadError::invalid(format!(
            "weights sum to {total}, cannot normalize"
        )));
    }
    Ok(weights.into_iter().map(|w| w / total).collect())
}

/// Picks an index from a normalized probability vector given a uniform
/// `roll` in `[0, 1)`.
///
/// Pure function of its inputs: walks the cumulative distribution and
/// returns the first index whose cumulative mass exceeds `roll`. Rounding
/// slack at the top end falls to the last index with nonzero mass.
pub fn pick_index(probabilities: &[f64], roll: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if roll < cumulative {
            return i;
        }
    }
    probabilities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or(probabilities.len().saturating_sub(1))
}

/// Draws an index according to `probabilities`.
pub fn weighted_draw<R: Rng>(probabilities: &[f64], rng: &mut R) -> usize {
    let roll: f64 = rng.random_range(0.0..1.0);
    pick_index(probabilities, roll)
}

/// Indices of `values` in ascending order. Ties keep index order.
pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..values.len()).collect();
    idx.sort_by(|&a, &b| {
        values[a]
            .partial_cmp(&values[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    idx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_probabilities() {
        let p = inverse_probabilities(&[1.0, 2.0, 4.0]).unwrap();
        assert!((p[0] - 4.0 / 7.0).abs() < 1e-12);
        assert!((p[1] - 2.0 / 7.0).abs() < 1e-12);
        assert!((p[2] - 1.0 / 7.0).abs() < 1e-12);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_probabilities_rejects_degenerate() {
        assert!(inverse_probabilities(&[]).is_err());
        assert!(inverse_probabilities(&[0.0, 1.0]).is_err());
        assert!(inverse_probabilities(&[-1.0, 1.0]).is_err());
        assert!(inverse_probabilities(&[f64::INFINITY]).is_err());
        assert!(inverse_probabilities(&[f64::NAN, 1.0]).is_err());
    }

    #[test]
    fn test_pick_index_boundaries() {
        let p = [0.25, 0.5, 0.25];
        assert_eq!(pick_index(&p, 0.0), 0);
        assert_eq!(pick_index(&p, 0.2499), 0);
        assert_eq!(pick_index(&p, 0.25), 1);
        assert_eq!(pick_index(&p, 0.7499), 1);
        assert_eq!(pick_index(&p, 0.75), 2);
        assert_eq!(pick_index(&p, 0.999_999), 2);
    }

    #[test]
    fn test_pick_index_rounding_slack() {
        // Mass sums slightly below 1.0; the top of the range lands on the
        // last candidate that can actually be chosen.
        let p = [0.5, 0.499_999, 0.0];
        assert_eq!(pick_index(&p, 0.999_9999), 1);
    }

    #[test]
    fn test_weighted_draw_deterministic_under_seed() {
        let p = [0.1, 0.2, 0.3, 0.4];
        let a: Vec<usize> = {
            let mut rng = create_rng(7);
            (0..50).map(|_| weighted_draw(&p, &mut rng)).collect()
        };
        let b: Vec<usize> = {
            let mut rng = create_rng(7);
            (0..50).map(|_| weighted_draw(&p, &mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_weighted_draw_frequencies() {
        let p = [0.8, 0.2];
        let mut rng = create_rng(42);
        let zeros = (0..10_000)
            .filter(|_| weighted_draw(&p, &mut rng) == 0)
            .count();
        assert!(
            (7_500..8_500).contains(&zeros),
            "expected ~8000 draws of index 0, got {zeros}"
        );
    }

    #[test]
    fn test_argsort_stable() {
        assert_eq!(argsort(&[3.0, 1.0, 2.0, 1.0]), vec![1, 3, 2, 0]);
        assert!(argsort(&[]).is_empty());
    }
}
