//! Error types for solver invocation.
//!
//! Infeasibility, unboundedness and timeouts are solve *statuses*, not errors.
//! These variants cover the cases where the backend could not produce a status
//! at all.

use thiserror::Error;

/// Errors that can occur during solver operations.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The backend failed without reporting a status.
    #[error("solver backend failed: {0}")]
    Backend(String),

    /// The model uses a feature the backend cannot handle.
    #[error("model not supported by solver: {0}")]
    UnsupportedModel(String),

    /// The requested backend was not compiled in.
    #[error("solver {solver} is not available. {hint}")]
    Unavailable { solver: String, hint: String },
}

/// Result type alias for solver operations.
pub type SolverResult<T> = Result<T, SolverError>;
