//! Randomized lookahead solver for stage-wise resource assignment.
//!
//! Given a manufacturing problem instance (which stages each task
//! subcomponent passes through, and what every resource costs at every
//! stage), the solver picks one resource per stage for each subcomponent,
//! trading execution cost against the cost of moving between resources.
//!
//! - [`problem`]: Raw instance data and shape validation
//! - [`cost`]: Execution and transition cost matrices
//! - [`random`]: Seeded RNG and the weighted-draw primitive
//! - [`lookahead`]: Sampler, batch, subproblem and whole-instance solvers
//!
//! # Architecture
//!
//! Data flows one way: instance → [`cost::CostModel`] → sampler → batch →
//! subproblem solver → [`lookahead::ProblemSolver`] → [`lookahead::Solution`].
//! Loading instances and reporting results are left to the caller.

pub mod cost;
pub mod error;
pub mod lookahead;
pub mod problem;
pub mod random;

pub use error::{LookaheadError, Result};
