//! The solver capability.
//!
//! A [`SolverBackend`] takes a finished [`Model`] and a wall-clock budget and
//! returns one outcome. It is a single blocking call with no cancellation;
//! the time limit is the only way to bound it.

use std::time::Duration;

use crate::error::ModelError;
use crate::expr::{LinearExpr, VarId};
use crate::model::Model;

/// Outcome reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverStatus {
    /// A solution was found and proven optimal.
    Optimal,
    /// A solution was found but the time budget ran out before proving
    /// optimality.
    Feasible,
    /// The model has no solution.
    Infeasible,
    /// The budget ran out before any solution was found.
    Unknown,
}

impl SolverStatus {
    pub fn has_solution(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    /// Returns the status as a string.
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "OPTIMAL",
            SolverStatus::Feasible => "FEASIBLE",
            SolverStatus::Infeasible => "INFEASIBLE",
            SolverStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Values of every model variable, indexed by [`VarId::index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    values: Vec<i64>,
}

impl Solution {
    pub fn new(values: Vec<i64>) -> Self {
        Self { values }
    }

    pub fn value(&self, var: VarId) -> i64 {
        self.values[var.index()]
    }

    pub fn evaluate(&self, expr: &LinearExpr) -> i64 {
        expr.evaluate(&self.values)
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// Result of one backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverOutcome {
    pub status: SolverStatus,
    /// Present iff `status.has_solution()`.
    pub solution: Option<Solution>,
}

impl SolverOutcome {
    pub fn solved(status: SolverStatus, solution: Solution) -> Self {
        Self {
            status,
            solution: Some(solution),
        }
    }

    pub fn infeasible() -> Self {
        Self {
            status: SolverStatus::Infeasible,
            solution: None,
        }
    }

    pub fn unknown() -> Self {
        Self {
            status: SolverStatus::Unknown,
            solution: None,
        }
    }
}

/// `solve(model, time_limit) -> status, assignment`.
///
/// Implementations must treat each call independently: no state may carry
/// over from one model to the next.
pub trait SolverBackend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Minimizes the model's objective within `time_limit`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] only when the backend cannot represent the model
    /// or fails internally. Infeasibility and timeouts are statuses, not
    /// errors.
    fn solve(&self, model: &Model, time_limit: Duration) -> Result<SolverOutcome, ModelError>;
}
