//! Randomized sliding-horizon lookahead.
//!
//! Assigns each subcomponent one resource ("city") per available stage,
//! minimizing accumulated execution plus transition cost. The solver is
//! an anytime heuristic: it repeatedly samples short trajectories over a
//! lookahead horizon, keeps the cheapest, and commits a prefix of it
//! before sampling again. Quality grows with the batch size; optimality is
//! not guaranteed.
//!
//! # Key Types
//!
//! - [`LookaheadConfig`]: Pool size, widths, batch size, seed
//! - [`LookaheadSampler`]: Draws one randomized trajectory
//! - [`TrajectoryBatch`]: Draws many trajectories and keeps the cheapest
//! - [`SubproblemSolver`]: Solves one subcomponent stage by stage
//! - [`ProblemSolver`]: Solves a whole instance and tracks the running total
//! - [`Solution`]: Paths per subcomponent plus total cost

mod batch;
mod config;
mod runner;
mod sampler;
mod subproblem;
mod types;

pub use batch::TrajectoryBatch;
pub use config::{EmptyStagePolicy, LookaheadConfig};
pub use runner::ProblemSolver;
pub use sampler::LookaheadSampler;
pub use subproblem::{SubproblemSolver, SubproblemState};
pub use types::{RandomWalk, RunningTotal, Solution, SubproblemResult};
