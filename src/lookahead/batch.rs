//! Batches of independent trajectories.
//!
//! Each draw gets its own RNG, seeded from the caller's RNG before any
//! draw runs. Draws are therefore independent of evaluation order, and a
//! parallel batch returns exactly what a sequential batch would.

use super::sampler::LookaheadSampler;
use super::types::RandomWalk;
use crate::error::Result;
use crate::random::create_rng;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Draws many trajectories and keeps the cheapest.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryBatch<'a> {
    sampler: LookaheadSampler<'a>,
    count: usize,
    parallel: bool,
}

impl<'a> TrajectoryBatch<'a> {
    /// Creates a batch of `count` draws from `sampler`.
    ///
    /// A `count` of zero is clamped to one draw; use
    /// [`LookaheadConfig::validate`](super::LookaheadConfig::validate) to
    /// reject it instead.
    pub fn new(sampler: LookaheadSampler<'a>, count: usize) -> Self {
        Self {
            sampler,
            count: count.max(1),
            parallel: false,
        }
    }

    /// Enables parallel draws (requires the `parallel` feature).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of draws per batch.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether draws were requested to run in parallel.
    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Draws every trajectory of the batch, in draw order.
    pub fn sample_all<R: Rng>(
        &self,
        horizon: &[usize],
        start: Option<usize>,
        rng: &mut R,
    ) -> Result<Vec<RandomWalk>> {
        let seeds: Vec<u64> = (0..self.count).map(|_| rng.random()).collect();
        let sampler = self.sampler;
        let draw = move |seed: &u64| sampler.sample(horizon, start, 0.0, &mut create_rng(*seed));

        #[cfg(feature = "parallel")]
        if self.parallel {
            return seeds.par_iter().map(draw).collect();
        }

        seeds.iter().map(draw).collect()
    }

    /// Draws the batch and returns the cheapest trajectory.
    ///
    /// Ties go to the earliest draw.
    pub fn sample_many<R: Rng>(
        &self,
        horizon: &[usize],
        start: Option<usize>,
        rng: &mut R,
    ) -> Result<RandomWalk> {
        let walks = self.sample_all(horizon, start, rng)?;
        Ok(select_best(walks))
    }
}

/// Cheapest walk; the first one wins ties.
///
/// # Panics
/// Panics if `walks` is empty.
fn select_best(walks: Vec<RandomWalk>) -> RandomWalk {
    walks
        .into_iter()
        .reduce(|best, walk| if walk.cost < best.cost { walk } else { best })
        .expect("batch must contain at least one walk")
}
