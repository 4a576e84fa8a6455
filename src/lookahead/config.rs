//! Lookahead solver configuration.

use crate::error::{LookaheadError, Result};

/// What to do with a subcomponent that has no available stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyStagePolicy {
    /// Resolve it as an empty path with zero cost.
    #[default]
    ZeroCost,
    /// Reject it: the subproblem fails with
    /// [`LookaheadError::EmptyHorizon`] and the whole instance with
    /// [`LookaheadError::InvalidInput`].
    Reject,
}

/// Configuration for the lookahead solver.
///
/// # Defaults
///
/// ```
/// use u_lookahead::lookahead::LookaheadConfig;
///
/// let config = LookaheadConfig::default();
/// assert_eq!(config.n_best, 1);
/// assert_eq!(config.horizon_width, 1);
/// assert_eq!(config.commit_width, 1);
/// assert_eq!(config.batch_size, 500);
/// assert!(!config.persist_total);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_lookahead::lookahead::LookaheadConfig;
///
/// let config = LookaheadConfig::default()
///     .with_n_best(3)
///     .with_horizon_width(4)
///     .with_commit_width(2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct LookaheadConfig {
    /// Candidate pool size once a predecessor resource exists.
    ///
    /// With `1` the predecessor-case draw is plain greedy selection.
    pub n_best: usize,

    /// Stages looked ahead per resample.
    pub horizon_width: usize,

    /// Resources committed from the best trajectory before resampling.
    pub commit_width: usize,

    /// Trajectories drawn per resample.
    pub batch_size: usize,

    /// Whether solved costs are folded into the running total.
    pub persist_total: bool,

    /// Handling of subcomponents without available stages.
    pub empty_stage_policy: EmptyStagePolicy,

    /// Whether to draw batch trajectories in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Results are identical
    /// either way for the same seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for LookaheadConfig {
    fn default() -> Self {
        Self {
            n_best: 1,
            horizon_width: 1,
            commit_width: 1,
            batch_size: 500,
            persist_total: false,
            empty_stage_policy: EmptyStagePolicy::default(),
            parallel: true,
            seed: None,
        }
    }
}

impl LookaheadConfig {
    /// Sets the predecessor-case candidate pool size.
    pub fn with_n_best(mut self, n: usize) -> Self {
        self.n_best = n;
        self
    }

    /// Sets the lookahead horizon width.
    pub fn with_horizon_width(mut self, n: usize) -> Self {
        self.horizon_width = n;
        self
    }

    /// Sets how many resources are committed per resample.
    pub fn with_commit_width(mut self, n: usize) -> Self {
        self.commit_width = n;
        self
    }

    /// Sets the number of trajectories per batch.
    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    /// Enables or disables folding costs into the running total.
    pub fn with_persist_total(mut self, persist: bool) -> Self {
        self.persist_total = persist;
        self
    }

    /// Sets the empty-subproblem policy.
    pub fn with_empty_stage_policy(mut self, policy: EmptyStagePolicy) -> Self {
        self.empty_stage_policy = policy;
        self
    }

    /// Enables or disables parallel batch sampling.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.n_best == 0 {
            return Err(LookaheadError::InvalidConfig("n_best must be at least 1".into()));
        }
        if self.horizon_width == 0 {
            return Err(LookaheadError::InvalidConfig(
                "horizon_width must be at least 1".into(),
            ));
        }
        if self.commit_width == 0 {
            return Err(LookaheadError::InvalidConfig(
                "commit_width must be at least 1".into(),
            ));
        }
        if self.batch_size == 0 {
            return Err(LookaheadError::InvalidConfig(
                "batch_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LookaheadConfig::default();
        assert_eq!(config.n_best, 1);
        assert_eq!(config.batch_size, 500);
        assert_eq!(config.empty_stage_policy, EmptyStagePolicy::ZeroCost);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_widths() {
        assert!(LookaheadConfig::default().with_n_best(0).validate().is_err());
        assert!(LookaheadConfig::default()
            .with_horizon_width(0)
            .validate()
            .is_err());
        assert!(LookaheadConfig::default()
            .with_commit_width(0)
            .validate()
            .is_err());
        assert!(LookaheadConfig::default()
            .with_batch_size(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_commit_wider_than_horizon_is_allowed() {
        // The committed plan is capped by the trajectory length anyway.
        let config = LookaheadConfig::default()
            .with_horizon_width(2)
            .with_commit_width(5);
        assert!(config.validate().is_ok());
    }
}
