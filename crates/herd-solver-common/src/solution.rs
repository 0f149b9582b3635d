//! Solution representation returned by solver backends.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::VarId;

/// Status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Proven optimal solution found.
    Optimal,
    /// Time budget ran out with a feasible incumbent; not proven optimal.
    TimedOutFeasible,
    /// Time budget ran out before any feasible solution was found.
    TimedOutNoSolution,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
}

impl SolveStatus {
    /// Whether an assignment accompanies this status.
    pub fn has_solution(&self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::TimedOutFeasible)
    }

    pub fn is_proven_optimal(&self) -> bool {
        matches!(self, SolveStatus::Optimal)
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "optimal"),
            SolveStatus::TimedOutFeasible => write!(f, "timed_out_feasible"),
            SolveStatus::TimedOutNoSolution => write!(f, "timed_out_no_solution"),
            SolveStatus::Infeasible => write!(f, "infeasible"),
            SolveStatus::Unbounded => write!(f, "unbounded"),
        }
    }
}

/// Values of solved variables. A variable with no recorded value reads as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    values: HashMap<VarId, f64>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assignment from a dense vector indexed by variable position.
    pub fn from_dense(values: &[f64]) -> Self {
        Self {
            values: values
                .iter()
                .enumerate()
                .map(|(i, v)| (VarId(i), *v))
                .collect(),
        }
    }

    pub fn set(&mut self, var: VarId, value: f64) {
        self.values.insert(var, value);
    }

    pub fn get(&self, var: VarId) -> Option<f64> {
        self.values.get(&var).copied()
    }

    pub fn value_or_zero(&self, var: VarId) -> f64 {
        self.get(var).unwrap_or(0.0)
    }

    /// Value rounded to the nearest non-negative integer.
    ///
    /// Integer variables come back from MIP backends with small float noise
    /// (`9.9999999`), so reporting reads them through this accessor.
    pub fn integer_value(&self, var: VarId) -> u64 {
        let v = self.value_or_zero(var);
        if v.is_finite() && v > 0.0 {
            v.round() as u64
        } else {
            0
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Everything a solver returns for one model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveOutcome {
    pub status: SolveStatus,
    /// Objective of the returned assignment, when a solution exists.
    ///
    /// Backends fill this from the model objective at the solved point, so it
    /// checks the objective coefficients, not the backend's own arithmetic.
    pub objective: Option<f64>,
    pub assignment: Assignment,
    pub solve_time: Duration,
    /// Identifier of the backend that produced this outcome.
    pub solver: String,
}

impl SolveOutcome {
    /// Outcome carrying a solution.
    pub fn with_solution(
        status: SolveStatus,
        objective: f64,
        assignment: Assignment,
        solver: impl Into<String>,
    ) -> Self {
        Self {
            status,
            objective: Some(objective),
            assignment,
            solve_time: Duration::ZERO,
            solver: solver.into(),
        }
    }

    /// Outcome with no solution (infeasible, unbounded or timed out empty-handed).
    pub fn without_solution(status: SolveStatus, solver: impl Into<String>) -> Self {
        Self {
            status,
            objective: None,
            assignment: Assignment::new(),
            solve_time: Duration::ZERO,
            solver: solver.into(),
        }
    }

    pub fn with_solve_time(mut self, elapsed: Duration) -> Self {
        self.solve_time = elapsed;
        self
    }
}
