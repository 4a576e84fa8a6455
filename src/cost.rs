//! Derived cost matrices.
//!
//! [`CostModel`] turns the raw instance data into the two dense matrices
//! the sampler works with:
//!
//! - `cost_operations[s][c] = time_cost[s][c] * op_cost[s][c] / productivity[s][c]`
//! - `trans_cost[a][b] = dist[a][b] * transportation_cost`
//!
//! Both are built fresh for each instance and never mutated afterwards.

use crate::error::{LookaheadError, Result};
use crate::problem::{Matrix, ProblemInstance};

/// Execution and transition costs for one problem instance.
#[derive(Debug, Clone, PartialEq)]
pub struct CostModel {
    cost_operations: Matrix,
    trans_cost: Matrix,
}

impl CostModel {
    /// Builds both cost matrices from `instance`.
    ///
    /// # Errors
    /// [`LookaheadError::InvalidInput`] if shapes are inconsistent, an
    /// entry is not finite, or any productivity entry is zero.
    pub fn build(instance: &ProblemInstance) -> Result<Self> {
        instance.validate()?;

        let mut cost_operations = Vec::with_capacity(instance.n_stages());
        for (s, row) in instance.time_cost.iter().enumerate() {
            let mut out = Vec::with_capacity(row.len());
            for (c, &time) in row.iter().enumerate() {
                let productivity = instance.productivity[s][c];
                if productivity == 0.0 {
                    return Err(LookaheadError::invalid(format!(
                        "productivity[{s}][{c}] is zero"
                    )));
                }
                let cost = time * instance.op_cost[s][c] / productivity;
                if !cost.is_finite() {
                    return Err(LookaheadError::invalid(format!(
                        "cost_operations[{s}][{c}] overflows"
                    )));
                }
                out.push(cost);
            }
            cost_operations.push(out);
        }

        let trans_cost = instance
            .dist
            .iter()
            .enumerate()
            .map(|(a, row)| {
                row.iter()
                    .enumerate()
                    .map(|(b, &d)| {
                        let cost = d * instance.transportation_cost.rate(a, b);
                        if cost.is_finite() {
                            Ok(cost)
                        } else {
                            Err(LookaheadError::invalid(format!(
                                "trans_cost[{a}][{b}] overflows"
                            )))
                        }
                    })
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Matrix>>()?;

        Ok(Self {
            cost_operations,
            trans_cost,
        })
    }

    /// Builds a model directly from precomputed matrices.
    ///
    /// Used when the caller already holds derived costs (e.g. in tests or
    /// when replaying a stored model).
    pub fn from_matrices(cost_operations: Matrix, trans_cost: Matrix) -> Result<Self> {
        let resources = cost_operations.first().map_or(0, Vec::len);
        if cost_operations.is_empty() || resources == 0 {
            return Err(LookaheadError::invalid("cost_operations is empty"));
        }
        if cost_operations.iter().any(|row| row.len() != resources) {
            return Err(LookaheadError::invalid("cost_operations is ragged"));
        }
        if trans_cost.len() != resources || trans_cost.iter().any(|row| row.len() != resources) {
            return Err(LookaheadError::invalid(format!(
                "trans_cost must be {resources} x {resources}"
            )));
        }
        for (name, m) in [("cost_operations", &cost_operations), ("trans_cost", &trans_cost)] {
            for (i, row) in m.iter().enumerate() {
                if let Some(j) = row.iter().position(|v| !v.is_finite()) {
                    return Err(LookaheadError::invalid(format!(
                        "{name}[{i}][{j}] is not finite"
                    )));
                }
            }
        }
        Ok(Self {
            cost_operations,
            trans_cost,
        })
    }

    /// Stage × resource execution cost matrix.
    pub fn cost_operations(&self) -> &Matrix {
        &self.cost_operations
    }

    /// Resource × resource transition cost matrix.
    pub fn trans_cost(&self) -> &Matrix {
        &self.trans_cost
    }

    /// Number of stages covered by the model.
    pub fn n_stages(&self) -> usize {
        self.cost_operations.len()
    }

    /// Number of resources covered by the model.
    pub fn n_resources(&self) -> usize {
        self.trans_cost.len()
    }

    /// Execution cost of running stage `stage` on resource `city`.
    #[inline]
    pub fn operation(&self, stage: usize, city: usize) -> f64 {
        self.cost_operations[stage][city]
    }

    /// Execution cost at `stage` plus the transition from `from` to `to`.
    #[inline]
    pub fn step(&self, stage: usize, from: usize, to: usize) -> f64 {
        self.cost_operations[stage][to] + self.trans_cost[from][to]
    }
}
