//! # herd-algo: Livestock Sourcing Optimization
//!
//! This crate turns a snapshot of sourcing tables into a mixed-integer linear
//! program, hands it to a [`MilpSolver`](herd_solver_common::MilpSolver), and
//! rolls the solved allocation up into cost lines and drill-down views.
//!
//! ## Pipeline
//!
//! | Stage | Entry point | Output |
//! |-------|-------------|--------|
//! | Resolve | [`SourcingData::from_tables`] | index sets + parameter maps |
//! | Build | [`build_model`] | [`SourcingModel`] |
//! | Solve | [`MilpSolver::solve`](herd_solver_common::MilpSolver::solve) | status + assignment |
//! | Aggregate | [`aggregate`] | [`SourcingReport`] |
//!
//! [`SourcingRun`] drives all four stages and is what most callers want.
//!
//! ## Example
//!
//! ```no_run
//! use herd_algo::{default_solver, SourcingConfig, SourcingRun};
//! use herd_core::InputTables;
//!
//! let tables = InputTables::new(); // Load your tables
//! let config = SourcingConfig::default();
//! let solver = default_solver(&config)?;
//!
//! let outcome = SourcingRun::prepare(&tables, 22_000.0, config)?.execute(solver.as_ref())?;
//! println!("{}", outcome.report.summary());
//! # Ok::<(), herd_algo::SourcingError>(())
//! ```

pub mod sourcing;

pub use sourcing::{
    aggregate, build_model, default_solver, run_sourcing, verify_plan, AllocationRow,
    CostBreakdown, Dimension, FleetConfig, IndexSets, ParameterSet, PlanViolation,
    PlantRollup, PlantWeekRollup, RunOutcome, SourcingConfig, SourcingData, SourcingError,
    SourcingModel, SourcingReport, SourcingResult, SourcingRun, SourcingTotals,
    VariableLayout, ViolationKind, WeekRollup, ZonePlantRollup, ZoneRollup, ZoneWeekRollup,
};

#[cfg(feature = "solver-highs")]
pub use sourcing::HighsSolver;
