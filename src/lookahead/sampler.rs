//! Single-trajectory lookahead sampling.
//!
//! For each stage of the horizon the sampler picks one resource at
//! random, favouring cheap ones:
//!
//! - **No predecessor** (very first stage of a subproblem): probabilities
//!   are the normalized inverse execution costs, indexed by resource. The
//!   candidate drawn at position `k` is the `k`-th cheapest resource, so
//!   the probability of the `k`-th cheapest is the weight of resource `k`,
//!   not its own weight.
//! - **Predecessor**: candidates are the `n_best` cheapest resources by
//!   execution + transition cost, drawn with normalized inverse-cost
//!   weights over that restricted set.
//!
//! The chosen resource becomes the predecessor for the next stage.

use super::types::RandomWalk;
use crate::cost::CostModel;
use crate::error::{LookaheadError, Result};
use crate::random::{argsort, inverse_probabilities, weighted_draw};
use rand::Rng;

/// Draws randomized trajectories over a horizon.
#[derive(Debug, Clone, Copy)]
pub struct LookaheadSampler<'a> {
    costs: &'a CostModel,
    n_best: usize,
}

impl<'a> LookaheadSampler<'a> {
    /// Creates a sampler with a predecessor-case pool of `n_best`.
    ///
    /// `n_best` is capped at the number of resources.
    pub fn new(costs: &'a CostModel, n_best: usize) -> Self {
        Self {
            costs,
            n_best: n_best.clamp(1, costs.n_resources().max(1)),
        }
    }

    /// Effective candidate pool size.
    pub fn n_best(&self) -> usize {
        self.n_best
    }

    /// Samples one trajectory over `horizon`.
    ///
    /// `start` is the resource committed before the horizon, `None` at the
    /// first stage of a subproblem. `cost` is the running cost the walk
    /// starts from.
    ///
    /// # Errors
    /// [`LookaheadError::InvalidInput`](crate::error::LookaheadError::InvalidInput)
    /// if a stage or `start` is out of range, or if a stage's weights
    /// cannot be normalized (zero, negative or non-finite costs).
    pub fn sample<R: Rng>(
        &self,
        horizon: &[usize],
        start: Option<usize>,
        cost: f64,
        rng: &mut R,
    ) -> Result<RandomWalk> {
        if let Some(&stage) = horizon.iter().find(|&&s| s >= self.costs.n_stages()) {
            return Err(LookaheadError::invalid(format!(
                "stage {stage} out of range ({} stages)",
                self.costs.n_stages()
            )));
        }
        if let Some(city) = start.filter(|&c| c >= self.costs.n_resources()) {
            return Err(LookaheadError::invalid(format!(
                "resource {city} out of range ({} resources)",
                self.costs.n_resources()
            )));
        }

        let mut walk = RandomWalk {
            cost,
            cities: Vec::with_capacity(horizon.len()),
        };
        let mut current = start;

        for &stage in horizon {
            let (city, step) = match current {
                None => self.draw_first(stage, rng)?,
                Some(prev) => self.draw_next(stage, prev, rng)?,
            };
            walk.cities.push(city);
            walk.cost += step;
            current = Some(city);
        }

        Ok(walk)
    }

    fn draw_first<R: Rng>(&self, stage: usize, rng: &mut R) -> Result<(usize, f64)> {
        let row = &self.costs.cost_operations()[stage];
        let probabilities = inverse_probabilities(row)?;
        let by_cost = argsort(row);
        let city = by_cost[weighted_draw(&probabilities, rng)];
        Ok((city, row[city]))
    }

    fn draw_next<R: Rng>(&self, stage: usize, prev: usize, rng: &mut R) -> Result<(usize, f64)> {
        let cost_total: Vec<f64> = (0..self.costs.n_resources())
            .map(|c| self.costs.step(stage, prev, c))
            .collect();
        let mut variants = argsort(&cost_total);
        variants.truncate(self.n_best);

        let candidate_costs: Vec<f64> = variants.iter().map(|&c| cost_total[c]).collect();
        let probabilities = inverse_probabilities(&candidate_costs)?;
        let city = variants[weighted_draw(&probabilities, rng)];
        Ok((city, cost_total[city]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn model() -> CostModel {
        // 3 stages x 3 resources
        CostModel::from_matrices(
            vec![
                vec![1.0, 2.0, 4.0],
                vec![3.0, 1.0, 2.0],
                vec![2.0, 2.0, 1.0],
            ],
            vec![
                vec![0.0, 1.0, 5.0],
                vec![1.0, 0.0, 2.0],
                vec![5.0, 2.0, 0.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_walk_has_one_city_per_stage() {
        let costs = model();
        let sampler = LookaheadSampler::new(&costs, 2);
        let mut rng = create_rng(42);
        for horizon in [&[0usize][..], &[0, 1], &[0, 1, 2], &[1, 2]] {
            let walk = sampler.sample(horizon, None, 0.0, &mut rng).unwrap();
            assert_eq!(walk.cities.len(), horizon.len());
        }
        let walk = sampler.sample(&[], Some(1), 3.0, &mut rng).unwrap();
        assert!(walk.cities.is_empty());
        assert_eq!(walk.cost, 3.0);
    }

    #[test]
    fn test_greedy_with_single_best() {
        let costs = model();
        let sampler = LookaheadSampler::new(&costs, 1);
        let mut rng = create_rng(1);
        // From resource 0: stage 1 totals [3, 2, 7] -> 1; stage 2 from 1: [3, 2, 3] -> 1.
        for _ in 0..20 {
            let walk = sampler.sample(&[1, 2], Some(0), 0.0, &mut rng).unwrap();
            assert_eq!(walk.cities, vec![1, 1]);
            assert_eq!(walk.cost, 4.0);
        }
    }

    #[test]
    fn test_cost_accumulates_from_start() {
        let costs = model();
        let sampler = LookaheadSampler::new(&costs, 1);
        let mut rng = create_rng(3);
        let walk = sampler.sample(&[1], Some(0), 10.0, &mut rng).unwrap();
        assert_eq!(walk.cost, 12.0);
    }

    #[test]
    fn test_first_stage_uses_positional_weights() {
        // Costs [4, 1]: weights by index are [0.2, 0.8] but sorted order
        // is [1, 0], so the cheap resource 1 is drawn only ~20% of the time.
        let costs =
            CostModel::from_matrices(vec![vec![4.0, 1.0]], vec![vec![0.0, 1.0], vec![1.0, 0.0]])
                .unwrap();
        let sampler = LookaheadSampler::new(&costs, 2);
        let mut rng = create_rng(42);
        let cheap = (0..10_000)
            .filter(|_| sampler.sample(&[0], None, 0.0, &mut rng).unwrap().cities[0] == 1)
            .count();
        assert!(
            (1_500..2_500).contains(&cheap),
            "expected ~2000 draws of the cheap resource, got {cheap}"
        );
    }

    #[test]
    fn test_first_stage_cost_is_own_entry() {
        let costs = model();
        let sampler = LookaheadSampler::new(&costs, 1);
        let mut rng = create_rng(5);
        for _ in 0..50 {
            let walk = sampler.sample(&[0], None, 0.0, &mut rng).unwrap();
            assert_eq!(walk.cost, costs.operation(0, walk.cities[0]));
        }
    }

    #[test]
    fn test_zero_cost_rejected() {
        let costs =
            CostModel::from_matrices(vec![vec![0.0, 1.0]], vec![vec![0.0, 1.0], vec![1.0, 0.0]])
                .unwrap();
        let sampler = LookaheadSampler::new(&costs, 1);
        let mut rng = create_rng(0);
        assert!(matches!(
            sampler.sample(&[0], None, 0.0, &mut rng),
            Err(LookaheadError::InvalidInput(_))
        ));
        // With a predecessor, 0 -> 0 has total cost 0.
        assert!(sampler.sample(&[0], Some(0), 0.0, &mut rng).is_err());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let costs = model();
        let sampler = LookaheadSampler::new(&costs, 2);
        let mut rng = create_rng(0);
        assert!(matches!(
            sampler.sample(&[0, 3], None, 0.0, &mut rng),
            Err(LookaheadError::InvalidInput(_))
        ));
        assert!(matches!(
            sampler.sample(&[0], Some(3), 0.0, &mut rng),
            Err(LookaheadError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_n_best_capped() {
        let costs = model();
        assert_eq!(LookaheadSampler::new(&costs, 10).n_best(), 3);
        assert_eq!(LookaheadSampler::new(&costs, 0).n_best(), 1);
    }

    proptest! {
        #[test]
        fn prop_predecessor_draw_within_n_best(
            seed in any::<u64>(),
            n_best in 1usize..=3,
            prev in 0usize..3,
            stage in 0usize..3,
        ) {
            let costs = model();
            let sampler = LookaheadSampler::new(&costs, n_best);
            let mut rng = create_rng(seed);
            let walk = sampler.sample(&[stage], Some(prev), 0.0, &mut rng).unwrap();

            let totals: Vec<f64> = (0..3).map(|c| costs.step(stage, prev, c)).collect();
            let ranked = argsort(&totals);
            prop_assert!(ranked[..n_best].contains(&walk.cities[0]));
            prop_assert_eq!(walk.cost, totals[walk.cities[0]]);
        }
    }
}
