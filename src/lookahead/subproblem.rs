//! Sliding-horizon solve of one subcomponent.
//!
//! # Algorithm
//!
//! Walk the available stages in order. Whenever the committed plan is
//! empty:
//!
//! 1. Take the next `horizon_width` stages as the horizon
//! 2. Draw a batch of trajectories from the current state
//! 3. Commit the first `commit_width` resources of the best trajectory
//!
//! Then pop one resource from the plan, pay its execution cost (plus the
//! transition from the previous resource, if any) and move on.
//!
//! # States
//!
//! | state | on commit of `city` at `stage` | incremental cost |
//! |-------|--------------------------------|------------------|
//! | `NoCity` | → `HasCity(city)` | `cost_operations[stage][city]` |
//! | `HasCity(prev)` | → `HasCity(city)` | `cost_operations[stage][city] + trans_cost[prev][city]` |

use std::collections::VecDeque;

use super::batch::TrajectoryBatch;
use super::config::{EmptyStagePolicy, LookaheadConfig};
use super::sampler::LookaheadSampler;
use super::types::SubproblemResult;
use crate::cost::CostModel;
use crate::error::{LookaheadError, Result};
use rand::Rng;
use tracing::trace;

/// Whether a resource has been committed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubproblemState {
    /// Nothing committed; the next draw has no predecessor.
    #[default]
    NoCity,
    /// The last committed resource.
    HasCity(usize),
}

impl SubproblemState {
    /// The committed resource, if any.
    pub fn current(self) -> Option<usize> {
        match self {
            SubproblemState::NoCity => None,
            SubproblemState::HasCity(city) => Some(city),
        }
    }

    /// Commits `city` at `stage`, returning the next state and the cost paid.
    pub fn advance(self, costs: &CostModel, stage: usize, city: usize) -> (Self, f64) {
        let step = match self {
            SubproblemState::NoCity => costs.operation(stage, city),
            SubproblemState::HasCity(prev) => costs.step(stage, prev, city),
        };
        (SubproblemState::HasCity(city), step)
    }
}

/// Solves one subcomponent stage by stage.
#[derive(Debug, Clone, Copy)]
pub struct SubproblemSolver<'a> {
    costs: &'a CostModel,
    batch: TrajectoryBatch<'a>,
    horizon_width: usize,
    commit_width: usize,
    empty_stage_policy: EmptyStagePolicy,
}

impl<'a> SubproblemSolver<'a> {
    /// Creates a solver over `costs` using the widths and batch size of `config`.
    ///
    /// Zero `horizon_width`, `commit_width` or `batch_size` are clamped to
    /// one; [`ProblemSolver`](super::ProblemSolver) rejects them up front
    /// through [`LookaheadConfig::validate`].
    pub fn new(costs: &'a CostModel, config: &LookaheadConfig) -> Self {
        let sampler = LookaheadSampler::new(costs, config.n_best);
        Self {
            costs,
            batch: TrajectoryBatch::new(sampler, config.batch_size).with_parallel(config.parallel),
            horizon_width: config.horizon_width.max(1),
            commit_width: config.commit_width.max(1),
            empty_stage_policy: config.empty_stage_policy,
        }
    }

    /// Solves the subcomponent active at `available_stages`.
    ///
    /// The returned path has one resource per stage and the cost is the
    /// sum of the per-stage incremental costs.
    ///
    /// # Errors
    /// - [`LookaheadError::EmptyHorizon`] if `available_stages` is empty and
    ///   the policy is [`EmptyStagePolicy::Reject`]
    /// - [`LookaheadError::InvalidInput`] if a stage is out of range or a
    ///   draw cannot normalize its weights
    pub fn solve<R: Rng>(&self, available_stages: &[usize], rng: &mut R) -> Result<SubproblemResult> {
        if available_stages.is_empty() {
            return match self.empty_stage_policy {
                EmptyStagePolicy::ZeroCost => Ok(SubproblemResult::default()),
                EmptyStagePolicy::Reject => Err(LookaheadError::EmptyHorizon),
            };
        }
        if let Some(&stage) = available_stages
            .iter()
            .find(|&&s| s >= self.costs.n_stages())
        {
            return Err(LookaheadError::invalid(format!(
                "stage {stage} out of range ({} stages)",
                self.costs.n_stages()
            )));
        }

        let mut state = SubproblemState::NoCity;
        let mut plan: VecDeque<usize> = VecDeque::with_capacity(self.commit_width);
        let mut trace = Vec::with_capacity(available_stages.len());

        for (i, &stage) in available_stages.iter().enumerate() {
            if plan.is_empty() {
                let end = (i + self.horizon_width).min(available_stages.len());
                let horizon = &available_stages[i..end];
                let best = self.batch.sample_many(horizon, state.current(), rng)?;
                trace!(
                    position = i,
                    horizon = horizon.len(),
                    walk_cost = best.cost,
                    "refilled committed plan"
                );
                plan.extend(best.cities.into_iter().take(self.commit_width));
            }

            let city = plan
                .pop_front()
                .ok_or_else(|| LookaheadError::invalid("trajectory shorter than its horizon"))?;
            let (next, step) = state.advance(self.costs, stage, city);
            state = next;
            trace.push((city, step));
        }

        Ok(SubproblemResult::from_trace(trace))
    }
}
