//! Error types for the load stage.

use thiserror::Error;

/// Errors that can occur while mapping a schema or loading rows.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Destination table already exists in `fail` mode.
    #[error("table '{table}' already exists (use --mode append or replace)")]
    TableExists { table: String },

    /// Column dtype has no SQL mapping.
    #[error("column '{column}' has unsupported dtype {dtype}")]
    UnsupportedType { column: String, dtype: String },

    /// Underlying database error.
    #[error("database error: {source}")]
    Database {
        #[from]
        source: sqlx::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for LoadError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;
