//! HiGHS backend through `good_lp`.

use std::time::Duration;

use good_lp::solvers::highs::highs;
use good_lp::solvers::{ResolutionError, SolutionStatus};
use good_lp::{constraint, variable, variables, Expression, Solution, SolverModel, Variable};
use herd_solver_common::{
    Assignment, CmpOp, LinearExpr, MilpModel, MilpSolver, Sense, SolveOutcome, SolveStatus,
    SolverError, SolverResult, VarId,
};
use tracing::{debug, info};
use web_time::Instant;

/// Violation above which a constant-only constraint makes the model infeasible.
const TRIVIAL_ROW_TOLERANCE: f64 = 1e-9;

/// What `good_lp` reports when HiGHS stops on its time limit with no incumbent.
const NO_SOLUTION_FOUND: &str = "NoSolutionFound";

/// Exact MILP solves with HiGHS.
#[derive(Debug, Clone, Default)]
pub struct HighsSolver {
    /// Relative MIP gap at which HiGHS may stop early.
    pub mip_gap: Option<f64>,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mip_gap(mut self, gap: Option<f64>) -> Self {
        self.mip_gap = gap;
        self
    }

}

/// Status of a solve that returned a point.
///
/// Stopping on the MIP gap is how HiGHS finishes a normal solve (its default
/// `mip_rel_gap` is 1e-4), so it counts as optimal. Only the time limit leaves
/// the incumbent unproven.
fn solved_status(status: SolutionStatus) -> SolveStatus {
    match status {
        SolutionStatus::Optimal | SolutionStatus::GapLimit => SolveStatus::Optimal,
        SolutionStatus::TimeLimit => SolveStatus::TimedOutFeasible,
    }
}

/// Status of a solve that returned no point, or the backend error.
fn unsolved_status(err: ResolutionError) -> SolverResult<SolveStatus> {
    match err {
        ResolutionError::Infeasible => Ok(SolveStatus::Infeasible),
        ResolutionError::Unbounded => Ok(SolveStatus::Unbounded),
        ResolutionError::Other(NO_SOLUTION_FOUND) => Ok(SolveStatus::TimedOutNoSolution),
        other => Err(SolverError::Backend(other.to_string())),
    }
}

fn to_expression(expr: &LinearExpr, vars: &[Variable]) -> SolverResult<Expression> {
    let mut out = Expression::from(expr.constant);
    for (var, coef) in &expr.terms {
        let v = vars.get(var.value()).ok_or_else(|| {
            SolverError::UnsupportedModel(format!("expression references unknown variable {}", var.value()))
        })?;
        out += *coef * *v;
    }
    Ok(out)
}

impl MilpSolver for HighsSolver {
    fn id(&self) -> &str {
        "highs"
    }

    fn solve(&self, model: &MilpModel, time_budget: Duration) -> SolverResult<SolveOutcome> {
        let start = Instant::now();

        if model.is_empty() {
            return Err(SolverError::UnsupportedModel(
                "model has no variables".to_string(),
            ));
        }

        // Rows without variables never reach HiGHS.
        let empty = Assignment::new();
        for c in model.constraints.iter().filter(|c| c.expr.is_empty()) {
            if c.violation(&empty) > TRIVIAL_ROW_TOLERANCE {
                debug!(constraint = %c.name, "constant row cannot hold");
                return Ok(SolveOutcome::without_solution(SolveStatus::Infeasible, self.id())
                    .with_solve_time(start.elapsed()));
            }
        }

        let mut vars = variables!();
        let lp_vars: Vec<Variable> = model
            .variables
            .iter()
            .map(|def| {
                let mut v = variable().min(def.lower);
                if let Some(upper) = def.upper {
                    v = v.max(upper);
                }
                if def.integer {
                    v = v.integer();
                }
                vars.add(v.name(def.name.clone()))
            })
            .collect();

        let objective = to_expression(&model.objective, &lp_vars)?;
        let unsolved = match model.sense {
            Sense::Maximize => vars.maximise(objective),
            Sense::Minimize => vars.minimise(objective),
        };

        let mut problem = unsolved
            .using(highs)
            .set_verbose(false)
            .set_option("time_limit", time_budget.as_secs_f64());
        if let Some(gap) = self.mip_gap {
            problem = problem.set_option("mip_rel_gap", gap);
        }

        for c in model.constraints.iter().filter(|c| !c.expr.is_empty()) {
            let lhs = to_expression(&c.expr, &lp_vars)?;
            let rhs = c.rhs;
            problem = match c.op {
                CmpOp::Le => problem.with(constraint!(lhs <= rhs)),
                CmpOp::Ge => problem.with(constraint!(lhs >= rhs)),
                CmpOp::Eq => problem.with(constraint!(lhs == rhs)),
            };
        }

        debug!(
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            budget_secs = time_budget.as_secs_f64(),
            "handing model to HiGHS"
        );

        let outcome = match problem.solve() {
            Ok(solution) => {
                let status = solved_status(solution.status());
                let mut assignment = Assignment::new();
                for (i, v) in lp_vars.iter().enumerate() {
                    assignment.set(VarId::new(i), solution.value(*v));
                }
                // Objective of the source model at HiGHS's point, not HiGHS's own figure.
                let objective = model.objective.evaluate(&assignment);
                SolveOutcome::with_solution(status, objective, assignment, self.id())
            }
            Err(e) => SolveOutcome::without_solution(unsolved_status(e)?, self.id()),
        };

        let elapsed = start.elapsed();
        info!(status = %outcome.status, elapsed_ms = elapsed.as_millis() as u64, "HiGHS finished");
        Ok(outcome.with_solve_time(elapsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herd_solver_common::{Constraint, VarDef};

    #[test]
    fn test_gap_stop_counts_as_optimal() {
        assert_eq!(solved_status(SolutionStatus::Optimal), SolveStatus::Optimal);
        assert_eq!(solved_status(SolutionStatus::GapLimit), SolveStatus::Optimal);
        assert_eq!(solved_status(SolutionStatus::TimeLimit), SolveStatus::TimedOutFeasible);
    }

    #[test]
    fn test_empty_handed_timeout_is_status() {
        assert_eq!(
            unsolved_status(ResolutionError::Other("NoSolutionFound")).unwrap(),
            SolveStatus::TimedOutNoSolution
        );
        assert_eq!(unsolved_status(ResolutionError::Infeasible).unwrap(), SolveStatus::Infeasible);
        assert_eq!(unsolved_status(ResolutionError::Unbounded).unwrap(), SolveStatus::Unbounded);
        assert!(matches!(
            unsolved_status(ResolutionError::Str("license".to_string())),
            Err(SolverError::Backend(_))
        ));
    }

    #[test]
    fn test_small_integer_program() {
        // max 3x + 2y  s.t.  x + y <= 4.5, x <= 2.5, integers
        let mut model = MilpModel::new("small", Sense::Maximize);
        let x = model.add_variable(VarDef::non_negative_integer("x"));
        let y = model.add_variable(VarDef::non_negative_integer("y"));
        model.objective = LinearExpr::new().with_term(x, 3.0).with_term(y, 2.0);
        model.add_constraint(Constraint::new("sum", LinearExpr::sum([x, y]), CmpOp::Le, 4.5));
        model.add_constraint(Constraint::new("x_cap", LinearExpr::sum([x]), CmpOp::Le, 2.5));

        let outcome = HighsSolver::new().solve(&model, Duration::from_secs(10)).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert_eq!(outcome.assignment.integer_value(x), 2);
        assert_eq!(outcome.assignment.integer_value(y), 2);
        assert!((outcome.objective.unwrap() - 10.0).abs() < 1e-6);
        assert_eq!(outcome.objective, Some(model.objective.evaluate(&outcome.assignment)));
        assert_eq!(outcome.solver, "highs");
    }

    #[test]
    fn test_infeasible_program() {
        let mut model = MilpModel::new("infeasible", Sense::Maximize);
        let x = model.add_variable(VarDef::non_negative_integer("x"));
        model.objective = LinearExpr::sum([x]);
        model.add_constraint(Constraint::new("need", LinearExpr::sum([x]), CmpOp::Eq, 10.0));
        model.add_constraint(Constraint::new("cap", LinearExpr::sum([x]), CmpOp::Le, 5.0));

        let outcome = HighsSolver::new().solve(&model, Duration::from_secs(10)).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(outcome.assignment.is_empty());
    }

    #[test]
    fn test_constant_row_short_circuits() {
        let mut model = MilpModel::new("constant", Sense::Maximize);
        model.add_variable(VarDef::non_negative_integer("x").with_upper(1.0));
        model.add_constraint(Constraint::new("demand[W1]", LinearExpr::new(), CmpOp::Eq, 3.0));

        let outcome = HighsSolver::new().solve(&model, Duration::from_secs(1)).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_empty_model_rejected() {
        let model = MilpModel::new("empty", Sense::Maximize);
        let err = HighsSolver::new().solve(&model, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, SolverError::UnsupportedModel(_)));
    }
}
