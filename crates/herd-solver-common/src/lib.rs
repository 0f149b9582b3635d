//! Backend-neutral MILP model and solver contract.
//!
//! The sourcing model is assembled into a [`MilpModel`] (variables, linear
//! objective, linear constraints) and handed to any implementation of
//! [`MilpSolver`]. Nothing in this crate solves anything: the solver is an
//! external collaborator that returns a [`SolveOutcome`].
//!
//! ```text
//! herd-algo ──MilpModel──> MilpSolver (HiGHS, canned, ...) ──SolveOutcome──> aggregator
//! ```
//!
//! Keeping the contract here lets model-correctness tests run against
//! [`CannedSolver`], which returns a fixed assignment, with no MIP backend
//! installed.

pub mod error;
pub mod model;
pub mod solution;
pub mod solver;

pub use error::{SolverError, SolverResult};
pub use model::{CmpOp, Constraint, LinearExpr, MilpModel, Sense, VarDef, VarId};
pub use solution::{Assignment, SolveOutcome, SolveStatus};
pub use solver::{CannedSolver, MilpSolver};
