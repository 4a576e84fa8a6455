//! Problem instance definition.
//!
//! A [`ProblemInstance`] is the raw, read-only input of one solve: the
//! stage × subcomponent incidence matrix plus the per-stage and
//! per-resource cost data. Loading instances from disk is left to the
//! caller; this module only describes and validates them.

use crate::error::{LookaheadError, Result};

/// Dense row-major matrix.
pub type Matrix = Vec<Vec<f64>>;

/// Per-unit transportation cost between resources.
///
/// Multiplied elementwise with the distance matrix to obtain the
/// transition cost between two resources.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TransportationCost {
    /// One rate applied to every resource pair.
    Scalar(f64),
    /// A resource × resource rate matrix.
    Matrix(Matrix),
}

impl TransportationCost {
    /// Rate for moving from resource `from` to resource `to`.
    pub fn rate(&self, from: usize, to: usize) -> f64 {
        match self {
            TransportationCost::Scalar(rate) => *rate,
            TransportationCost::Matrix(m) => m[from][to],
        }
    }
}

impl Default for TransportationCost {
    fn default() -> Self {
        TransportationCost::Scalar(1.0)
    }
}

/// One manufacturing problem instance.
///
/// # Shapes
///
/// With `S` stages, `R` resources and `n_tasks` subcomponents:
///
/// | field | shape |
/// |-------|-------|
/// | `operation` | S × n_tasks |
/// | `dist` | R × R |
/// | `time_cost`, `op_cost`, `productivity` | S × R |
/// | `transportation_cost` | scalar or R × R |
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemInstance {
    /// Number of task subcomponents.
    pub n_tasks: usize,
    /// Nonzero `operation[s][k]` marks stage `s` as available to subcomponent `k`.
    pub operation: Matrix,
    /// Distance between resources.
    pub dist: Matrix,
    /// Processing time per stage and resource.
    pub time_cost: Matrix,
    /// Operating cost rate per stage and resource.
    pub op_cost: Matrix,
    /// Productivity per stage and resource. Must be nonzero.
    pub productivity: Matrix,
    /// Transportation rate.
    pub transportation_cost: TransportationCost,
}

impl ProblemInstance {
    /// Number of process stages.
    pub fn n_stages(&self) -> usize {
        self.time_cost.len()
    }

    /// Number of selectable resources.
    pub fn n_resources(&self) -> usize {
        self.time_cost.first().map_or(0, Vec::len)
    }

    /// Ascending stage indices where subcomponent `k` is active.
    ///
    /// # Errors
    /// Returns [`LookaheadError::InvalidInput`] if `k >= n_tasks` or the
    /// operation matrix is too narrow.
    pub fn available_stages(&self, k: usize) -> Result<Vec<usize>> {
        if k >= self.n_tasks {
            return Err(LookaheadError::invalid(format!(
                "subcomponent {k} out of range (n_tasks = {})",
                self.n_tasks
            )));
        }
        self.operation
            .iter()
            .enumerate()
            .filter_map(|(stage, row)| match row.get(k) {
                Some(&v) if v != 0.0 => Some(Ok(stage)),
                Some(_) => None,
                None => Some(Err(LookaheadError::invalid(format!(
                    "operation row {stage} has no column {k}"
                )))),
            })
            .collect()
    }

    /// Checks that every matrix has a consistent shape and finite entries.
    ///
    /// Zero productivity is reported by [`CostModel::build`](crate::cost::CostModel::build),
    /// which is where the division happens.
    pub fn validate(&self) -> Result<()> {
        let stages = self.n_stages();
        let resources = self.n_resources();
        if stages == 0 {
            return Err(LookaheadError::invalid("time_cost has no stages"));
        }
        if resources == 0 {
            return Err(LookaheadError::invalid("time_cost has no resources"));
        }

        check_shape("time_cost", &self.time_cost, stages, resources)?;
        check_shape("op_cost", &self.op_cost, stages, resources)?;
        check_shape("productivity", &self.productivity, stages, resources)?;
        check_shape("dist", &self.dist, resources, resources)?;

        match &self.transportation_cost {
            TransportationCost::Scalar(rate) => {
                if !rate.is_finite() {
                    return Err(LookaheadError::invalid(format!(
                        "transportation_cost is not finite: {rate}"
                    )));
                }
            }
            TransportationCost::Matrix(m) => {
                check_shape("transportation_cost", m, resources, resources)?;
            }
        }

        if self.operation.len() != stages {
            return Err(LookaheadError::invalid(format!(
                "operation has {} rows, expected {stages}",
                self.operation.len()
            )));
        }
        for (stage, row) in self.operation.iter().enumerate() {
            if row.len() < self.n_tasks {
                return Err(LookaheadError::invalid(format!(
                    "operation row {stage} has {} columns, expected at least {}",
                    row.len(),
                    self.n_tasks
                )));
            }
        }
        Ok(())
    }
}

fn check_shape(name: &str, m: &Matrix, rows: usize, cols: usize) -> Result<()> {
    if m.len() != rows {
        return Err(LookaheadError::invalid(format!(
            "{name} has {} rows, expected {rows}",
            m.len()
        )));
    }
    for (i, row) in m.iter().enumerate() {
        if row.len() != cols {
            return Err(LookaheadError::invalid(format!(
                "{name} row {i} has {} columns, expected {cols}",
                row.len()
            )));
        }
        if let Some(j) = row.iter().position(|v| !v.is_finite()) {
            return Err(LookaheadError::invalid(format!(
                "{name}[{i}][{j}] is not finite"
            )));
        }
    }
    Ok(())
}
