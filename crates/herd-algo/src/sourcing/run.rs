//! One sourcing run: build, solve, aggregate.
//!
//! A [`SourcingRun`] owns its sets, parameters and model. Nothing is shared
//! between runs, so independent runs may execute on different threads.

use std::time::Duration;

use herd_core::InputTables;
use herd_solver_common::{Assignment, MilpSolver, SolveOutcome, SolveStatus, SolverResult};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::aggregate::{aggregate, SourcingReport};
use super::builder::{build_model, SourcingModel};
use super::config::SourcingConfig;
use super::error::SourcingResult;
use super::verify::{verify_plan, PlanViolation};

/// Slack allowed when checking a degenerate model's constant rows.
const DEGENERATE_TOLERANCE: f64 = 1e-9;

/// Solver id recorded when a model is resolved without a backend.
const NO_BACKEND: &str = "none";

/// What a run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub report: SourcingReport,
    /// Rules the solved plan breaks. Empty for a sound plan or no plan.
    pub violations: Vec<PlanViolation>,
    pub solve_time: Duration,
    pub solver: String,
}

impl RunOutcome {
    pub fn status(&self) -> SolveStatus {
        self.report.status
    }

    pub fn has_plan(&self) -> bool {
        self.report.has_plan()
    }
}

/// A prepared run.
#[derive(Debug, Clone)]
pub struct SourcingRun {
    model: SourcingModel,
    config: SourcingConfig,
}

impl SourcingRun {
    /// Validate `config` and build the model.
    ///
    /// Fails on a missing table or malformed value before anything is solved.
    pub fn prepare(tables: &InputTables, meat_price: f64, config: SourcingConfig) -> SourcingResult<Self> {
        config.validate()?;
        let model = build_model(tables, meat_price, config.fleet)?;
        Ok(Self { model, config })
    }

    pub fn model(&self) -> &SourcingModel {
        &self.model
    }

    pub fn config(&self) -> &SourcingConfig {
        &self.config
    }

    /// Solve with `solver` and aggregate whatever comes back.
    ///
    /// Infeasible, unbounded and timed-out solves are statuses on the outcome,
    /// not errors. Only a backend failure is an error. There is no retry.
    pub fn execute(&self, solver: &dyn MilpSolver) -> SourcingResult<RunOutcome> {
        let milp = &self.model.milp;
        let outcome = if milp.is_empty() {
            resolve_without_backend(&self.model)
        } else {
            info!(
                solver = solver.id(),
                variables = milp.num_variables(),
                constraints = milp.num_constraints(),
                budget_secs = self.config.time_budget_secs,
                "solving sourcing model"
            );
            solver.solve(milp, self.config.time_budget())?
        };

        match outcome.status {
            SolveStatus::Optimal => info!(objective = ?outcome.objective, "optimal plan found"),
            SolveStatus::TimedOutFeasible => {
                warn!(objective = ?outcome.objective, "time budget exhausted; plan is not proven optimal")
            }
            SolveStatus::TimedOutNoSolution => {
                warn!("time budget exhausted before any feasible plan was found")
            }
            SolveStatus::Infeasible | SolveStatus::Unbounded => {
                warn!(status = %outcome.status, "no feasible plan")
            }
        }

        let report = aggregate(&self.model, &outcome, self.config.objective_tolerance);
        if !report.breakdown.consistent {
            warn!(
                net_value = report.breakdown.net_value,
                solver_objective = ?report.breakdown.solver_objective,
                "recomputed net value disagrees with solver objective"
            );
        }

        let violations = if outcome.status.has_solution() {
            verify_plan(&self.model, &outcome.assignment, 1e-6)
        } else {
            Vec::new()
        };
        for v in &violations {
            warn!(violation = %v, "solved plan breaks a sourcing rule");
        }

        Ok(RunOutcome {
            report,
            violations,
            solve_time: outcome.solve_time,
            solver: outcome.solver,
        })
    }
}

/// A model without variables is optimal at zero if its constant rows hold.
fn resolve_without_backend(model: &SourcingModel) -> SolveOutcome {
    let empty = Assignment::new();
    match model.milp.max_violation(&empty) {
        Some((name, amount)) if amount > DEGENERATE_TOLERANCE => {
            warn!(constraint = name, amount, "degenerate model cannot meet a constant row");
            SolveOutcome::without_solution(SolveStatus::Infeasible, NO_BACKEND)
        }
        _ => SolveOutcome::with_solution(SolveStatus::Optimal, 0.0, empty, NO_BACKEND),
    }
}

/// Prepare and execute in one call.
pub fn run_sourcing(
    tables: &InputTables,
    meat_price: f64,
    config: SourcingConfig,
    solver: &dyn MilpSolver,
) -> SourcingResult<RunOutcome> {
    SourcingRun::prepare(tables, meat_price, config)?.execute(solver)
}

/// The solver used when the caller does not pick one.
#[cfg(feature = "solver-highs")]
pub fn default_solver(config: &SourcingConfig) -> SolverResult<Box<dyn MilpSolver>> {
    Ok(Box::new(super::highs::HighsSolver::new().with_mip_gap(config.mip_gap)))
}

/// The solver used when the caller does not pick one.
#[cfg(not(feature = "solver-highs"))]
pub fn default_solver(_config: &SourcingConfig) -> SolverResult<Box<dyn MilpSolver>> {
    Err(herd_solver_common::SolverError::Unavailable {
        solver: "highs".to_string(),
        hint: "rebuild with --features solver-highs".to_string(),
    })
}
