//! The solver capability and a canned implementation for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tracing::debug;

use crate::error::SolverResult;
use crate::model::MilpModel;
use crate::solution::{Assignment, SolveOutcome, SolveStatus};

/// A backend that can solve a [`MilpModel`] within a wall-clock budget.
///
/// Implementations must return once `time_budget` has elapsed, reporting the
/// best incumbent as [`SolveStatus::TimedOutFeasible`], or
/// [`SolveStatus::TimedOutNoSolution`] when there is none. There is no
/// cancellation beyond the budget. Retrying is the caller's business.
pub trait MilpSolver: Send + Sync {
    /// Unique identifier (e.g., "highs", "canned")
    fn id(&self) -> &str;

    /// Solve the model
    fn solve(&self, model: &MilpModel, time_budget: Duration) -> SolverResult<SolveOutcome>;
}

/// Solver stub that returns a fixed status and assignment.
///
/// Values are given by variable name so tests do not depend on the order in
/// which the model builder declares variables. Variables without a canned
/// value are left unassigned. The reported objective is the model objective
/// evaluated at the canned assignment unless overridden.
#[derive(Debug)]
pub struct CannedSolver {
    status: SolveStatus,
    values: HashMap<String, f64>,
    objective_override: Option<f64>,
    last_budget: Mutex<Option<Duration>>,
}

impl CannedSolver {
    pub fn new(status: SolveStatus) -> Self {
        Self {
            status,
            values: HashMap::new(),
            objective_override: None,
            last_budget: Mutex::new(None),
        }
    }

    pub fn optimal() -> Self {
        Self::new(SolveStatus::Optimal)
    }

    pub fn infeasible() -> Self {
        Self::new(SolveStatus::Infeasible)
    }

    pub fn with_value(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    pub fn with_objective(mut self, objective: f64) -> Self {
        self.objective_override = Some(objective);
        self
    }

    /// Budget passed to the most recent `solve` call.
    pub fn last_time_budget(&self) -> Option<Duration> {
        self.last_budget.lock().ok().and_then(|guard| *guard)
    }
}

impl MilpSolver for CannedSolver {
    fn id(&self) -> &str {
        "canned"
    }

    fn solve(&self, model: &MilpModel, time_budget: Duration) -> SolverResult<SolveOutcome> {
        if let Ok(mut guard) = self.last_budget.lock() {
            *guard = Some(time_budget);
        }

        if !self.status.has_solution() {
            return Ok(SolveOutcome::without_solution(self.status, self.id()));
        }

        let mut assignment = Assignment::new();
        for (name, value) in &self.values {
            match model.find_variable(name) {
                Some(var) => assignment.set(var, *value),
                None => debug!(variable = %name, "canned value for unknown variable ignored"),
            }
        }
        let objective = self
            .objective_override
            .unwrap_or_else(|| model.objective.evaluate(&assignment));

        Ok(SolveOutcome::with_solution(
            self.status,
            objective,
            assignment,
            self.id(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LinearExpr, Sense, VarDef};

    fn model() -> MilpModel {
        let mut model = MilpModel::new("m", Sense::Maximize);
        let x = model.add_variable(VarDef::non_negative_integer("x"));
        model.objective = LinearExpr::new().with_term(x, 5.0);
        model
    }

    #[test]
    fn test_traits_are_object_safe() {
        fn _accepts_solver(_s: &dyn MilpSolver) {}
        fn _assert_send_sync<T: Send + Sync>() {}
        _assert_send_sync::<Box<dyn MilpSolver>>();
    }

    #[test]
    fn test_canned_solver_evaluates_objective() {
        let solver = CannedSolver::optimal().with_value("x", 3.0).with_value("ghost", 1.0);
        let outcome = solver.solve(&model(), Duration::from_secs(60)).unwrap();

        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.objective, Some(15.0));
        assert_eq!(outcome.assignment.len(), 1);
        assert_eq!(outcome.solver, "canned");
        assert_eq!(solver.last_time_budget(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_canned_solver_infeasible() {
        let solver = CannedSolver::infeasible().with_value("x", 3.0);
        let outcome = solver.solve(&model(), Duration::from_secs(1)).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(outcome.assignment.is_empty());
        assert!(outcome.objective.is_none());
    }

    #[test]
    fn test_canned_objective_override() {
        let solver = CannedSolver::new(SolveStatus::TimedOutFeasible)
            .with_value("x", 1.0)
            .with_objective(4.0);
        let outcome = solver.solve(&model(), Duration::from_secs(1)).unwrap();
        assert_eq!(outcome.objective, Some(4.0));
        assert!(!outcome.status.is_proven_optimal());
    }
}
