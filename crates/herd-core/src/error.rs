//! Unified error type for input tables and parameter indexes.
//!
//! Only structural problems are errors here. A key that is absent from an
//! index is never an error; it reads as zero.

use thiserror::Error;

/// Errors raised while reading input tables or building parameter indexes.
#[derive(Error, Debug)]
pub enum HerdError {
    /// A table the model requires was not supplied at all.
    #[error("missing parameter table: {table}")]
    MissingParameterTable { table: String },

    /// A table is present but lacks a column the schema names.
    #[error("table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    /// A value cell could not be read as a number.
    #[error("table '{table}' row {row}: column '{column}' is not numeric ({value:?})")]
    InvalidValue {
        table: String,
        row: usize,
        column: String,
        value: String,
    },

    /// An index was requested with no key columns.
    #[error("table '{table}': at least one key column is required")]
    EmptyKeyColumns { table: String },

    /// A record does not have one cell per column.
    #[error("table '{table}': row has {got} cells, expected {expected}")]
    RowWidth {
        table: String,
        expected: usize,
        got: usize,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results using HerdError.
pub type HerdResult<T> = Result<T, HerdError>;

impl HerdError {
    pub fn missing_table(table: impl Into<String>) -> Self {
        HerdError::MissingParameterTable {
            table: table.into(),
        }
    }
}
