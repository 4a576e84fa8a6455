//! Value types produced by the lookahead solver.

use std::collections::BTreeMap;
use std::sync::Mutex;

/// One sampled trajectory over a horizon.
///
/// `cities` holds exactly one resource per horizon stage.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomWalk {
    /// Accumulated cost of the trajectory.
    pub cost: f64,
    /// Resource chosen at each stage of the horizon, in order.
    pub cities: Vec<usize>,
}

/// Realized path and cost of one subcomponent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubproblemResult {
    /// One resource per available stage.
    pub path: Vec<usize>,
    /// Incremental cost paid at each stage.
    pub step_costs: Vec<f64>,
    /// Sum of `step_costs`.
    pub cost: f64,
}

impl SubproblemResult {
    /// Finalizes a trace of `(city, incremental cost)` pairs.
    pub fn from_trace(trace: Vec<(usize, f64)>) -> Self {
        let (path, step_costs): (Vec<usize>, Vec<f64>) = trace.into_iter().unzip();
        let cost = step_costs.iter().sum();
        Self {
            path,
            step_costs,
            cost,
        }
    }
}

/// Resolved paths for every subcomponent of one instance.
///
/// Serializes as `{ "paths": { "suboperation_0": [..], .. }, "cost": f }`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Path per subcomponent key.
    ///
    /// Keys sort as strings, so `suboperation_10` precedes
    /// `suboperation_2`; use [`Solution::ordered_paths`] for subcomponent
    /// order.
    pub paths: BTreeMap<String, Vec<usize>>,
    /// Sum of all subcomponent costs.
    pub cost: f64,
}

impl Solution {
    /// Key under which subcomponent `k` is stored.
    pub fn key(k: usize) -> String {
        format!("suboperation_{k}")
    }

    /// Path of subcomponent `k`, if present.
    pub fn path(&self, k: usize) -> Option<&[usize]> {
        self.paths.get(&Self::key(k)).map(Vec::as_slice)
    }

    /// `(subcomponent index, path)` pairs in ascending index order.
    ///
    /// Keys that do not follow the `suboperation_<k>` form are skipped.
    pub fn ordered_paths(&self) -> Vec<(usize, &[usize])> {
        let mut ordered: Vec<(usize, &[usize])> = self
            .paths
            .iter()
            .filter_map(|(key, path)| {
                key.strip_prefix("suboperation_")
                    .and_then(|k| k.parse::<usize>().ok())
                    .map(|k| (k, path.as_slice()))
            })
            .collect();
        ordered.sort_by_key(|&(k, _)| k);
        ordered
    }
}

/// Accumulated cost across solved instances.
///
/// Starts at zero, only grows through [`add`](Self::add), and is only
/// cleared by an explicit [`reset`](Self::reset). Safe to share between
/// threads.
#[derive(Debug, Default)]
pub struct RunningTotal {
    total: Mutex<f64>,
}

impl RunningTotal {
    /// Creates a zeroed accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `delta` and returns the new total.
    pub fn add(&self, delta: f64) -> f64 {
        let mut total = self.total.lock().unwrap_or_else(|e| e.into_inner());
        *total += delta;
        *total
    }

    /// Current total.
    pub fn value(&self) -> f64 {
        *self.total.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Resets the total to zero.
    pub fn reset(&self) {
        *self.total.lock().unwrap_or_else(|e| e.into_inner()) = 0.0;
    }
}
