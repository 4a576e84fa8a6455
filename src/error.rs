//! Error taxonomy for the lookahead solver.
//!
//! There is no I/O in the solver, so nothing here is retryable: every
//! error is reproducible given the same instance, configuration and seed.

use thiserror::Error;

/// Errors raised while building cost matrices or solving an instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookaheadError {
    /// Malformed or inconsistent problem data: mismatched matrix shapes,
    /// non-finite entries, zero productivity, or a probability vector
    /// that cannot be normalized.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A subcomponent has no available stages and the configured policy
    /// rejects empty subproblems.
    #[error("subcomponent has no available stages")]
    EmptyHorizon,

    /// Configuration parameters are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The caller raised the cancellation flag between subproblems.
    #[error("solve cancelled after {completed} subproblem(s)")]
    Cancelled {
        /// Number of subproblems fully solved before cancellation.
        completed: usize,
    },
}

impl LookaheadError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        LookaheadError::InvalidInput(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LookaheadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = LookaheadError::invalid("productivity[0][1] is zero");
        assert_eq!(err.to_string(), "invalid input: productivity[0][1] is zero");

        let err = LookaheadError::Cancelled { completed: 3 };
        assert_eq!(err.to_string(), "solve cancelled after 3 subproblem(s)");
    }
}
