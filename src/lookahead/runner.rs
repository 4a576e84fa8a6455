//! Whole-instance solve.
//!
//! [`ProblemSolver`] builds the cost model once per instance, solves each
//! subcomponent independently and aggregates the paths and costs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::config::LookaheadConfig;
use super::subproblem::SubproblemSolver;
use super::types::{RunningTotal, Solution};
use crate::cost::CostModel;
use crate::error::{LookaheadError, Result};
use crate::problem::ProblemInstance;
use crate::random::rng_from_option;
use tracing::{debug, info, warn};

/// Solves problem instances with the lookahead heuristic.
///
/// # Usage
///
/// ```
/// use u_lookahead::lookahead::{LookaheadConfig, ProblemSolver};
/// use u_lookahead::problem::{ProblemInstance, TransportationCost};
///
/// let instance = ProblemInstance {
///     n_tasks: 1,
///     operation: vec![vec![1.0], vec![1.0]],
///     dist: vec![vec![0.0, 4.0], vec![4.0, 0.0]],
///     time_cost: vec![vec![1.0, 2.0], vec![1.0, 2.0]],
///     op_cost: vec![vec![1.0, 1.0], vec![1.0, 1.0]],
///     productivity: vec![vec![1.0, 1.0], vec![1.0, 1.0]],
///     transportation_cost: TransportationCost::Scalar(1.0),
/// };
///
/// let solver = ProblemSolver::new(LookaheadConfig::default().with_seed(42)).unwrap();
/// let solution = solver.solve(&instance).unwrap();
/// assert_eq!(solution.path(0), Some(&[0, 0][..]));
/// assert_eq!(solution.cost, 2.0);
/// ```
#[derive(Debug)]
pub struct ProblemSolver {
    config: LookaheadConfig,
    running_total: Arc<RunningTotal>,
}

impl ProblemSolver {
    /// Creates a solver with its own zeroed running total.
    ///
    /// # Errors
    /// [`LookaheadError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: LookaheadConfig) -> Result<Self> {
        Self::with_running_total(config, Arc::new(RunningTotal::new()))
    }

    /// Creates a solver that folds persisted costs into `running_total`.
    ///
    /// Several solvers may share one accumulator.
    pub fn with_running_total(
        config: LookaheadConfig,
        running_total: Arc<RunningTotal>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            running_total,
        })
    }

    /// The solver configuration.
    pub fn config(&self) -> &LookaheadConfig {
        &self.config
    }

    /// Current running total across persisted solves.
    pub fn running_total(&self) -> f64 {
        self.running_total.value()
    }

    /// Shared handle to the running total.
    pub fn running_total_handle(&self) -> Arc<RunningTotal> {
        Arc::clone(&self.running_total)
    }

    /// Clears the running total.
    pub fn reset_running_total(&self) {
        self.running_total.reset();
    }

    /// Solves `instance`, persisting the cost if the config says so.
    pub fn solve(&self, instance: &ProblemInstance) -> Result<Solution> {
        self.solve_with_cancel(instance, self.config.persist_total, None)
    }

    /// Solves `instance`, overriding the configured persistence flag.
    pub fn solve_persist(&self, instance: &ProblemInstance, persist_total: bool) -> Result<Solution> {
        self.solve_with_cancel(instance, persist_total, None)
    }

    /// Solves `instance` with an optional cancellation token.
    ///
    /// The flag is checked before each subproblem. A cancelled solve
    /// returns [`LookaheadError::Cancelled`] and leaves the running total
    /// untouched.
    pub fn solve_with_cancel(
        &self,
        instance: &ProblemInstance,
        persist_total: bool,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Solution> {
        let costs = CostModel::build(instance)?;
        if self.config.n_best > costs.n_resources() {
            warn!(
                n_best = self.config.n_best,
                resources = costs.n_resources(),
                "n_best exceeds resource count, using all resources"
            );
        }

        let solver = SubproblemSolver::new(&costs, &self.config);
        let mut rng = rng_from_option(self.config.seed);
        let mut solution = Solution::default();

        for k in 0..instance.n_tasks {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    return Err(LookaheadError::Cancelled { completed: k });
                }
            }

            let stages = instance.available_stages(k)?;
            if stages.is_empty() {
                warn!(subcomponent = k, "no available stages");
            }
            let result = solver.solve(&stages, &mut rng).map_err(|e| match e {
                LookaheadError::EmptyHorizon => LookaheadError::invalid(format!(
                    "subcomponent {k} has no available stages"
                )),
                other => other,
            })?;

            debug!(
                subcomponent = k,
                stages = stages.len(),
                cost = result.cost,
                "solved subproblem"
            );
            solution.cost += result.cost;
            solution.paths.insert(Solution::key(k), result.path);
        }

        info!(
            n_tasks = instance.n_tasks,
            stages = costs.n_stages(),
            resources = costs.n_resources(),
            cost = solution.cost,
            "solved instance"
        );

        if persist_total {
            let total = self.running_total.add(solution.cost);
            debug!(total, "updated running total");
        }

        Ok(solution)
    }

    /// Solves every instance of a dataset in order.
    ///
    /// Stops at the first failing instance.
    pub fn solve_all(&self, dataset: &[ProblemInstance]) -> Result<Vec<Solution>> {
        dataset.iter().map(|instance| self.solve(instance)).collect()
    }

    /// Solves instance `index` of a dataset.
    pub fn solve_indexed(&self, dataset: &[ProblemInstance], index: usize) -> Result<Solution> {
        let instance = dataset.get(index).ok_or_else(|| {
            LookaheadError::invalid(format!(
                "problem {index} out of range ({} problems)",
                dataset.len()
            ))
        })?;
        self.solve(instance)
    }
}
