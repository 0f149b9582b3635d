//! Sourcing pipeline errors.

use herd_core::HerdError;
use herd_solver_common::SolverError;
use thiserror::Error;

/// Errors that abort a sourcing run before a plan exists.
///
/// A solver that reports infeasibility or a timeout does not produce one of
/// these: that is a terminal status on the run outcome.
#[derive(Debug, Error)]
pub enum SourcingError {
    /// Input tables are incomplete or malformed.
    #[error(transparent)]
    Input(#[from] HerdError),

    /// The solver backend failed without a status.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Invalid run configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type SourcingResult<T> = Result<T, SourcingError>;
