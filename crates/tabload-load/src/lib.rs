//! Bulk loading of cleaned DataFrames into Postgres.
//!
//! Maps Polars dtypes (plus the width report from `tabload-clean`) to SQL
//! column types, creates or verifies the destination table, and inserts rows
//! in chunked multi-row INSERT statements sized to stay under the Postgres
//! bind-parameter limit.

mod error;
mod rows;
mod schema;
mod writer;

// === Error Types ===
pub use error::{LoadError, Result};

// === Schema Mapping ===
pub use schema::{ColumnSpec, SqlType, TableSchema, quote_ident};

// === Row Materialization ===
pub use rows::{TypedColumn, materialize_columns};

// === Loading ===
pub use writer::{
    DEFAULT_BATCH_SIZE, LoadMode, LoadOptions, PG_BIND_LIMIT, connect, load, rows_per_statement,
};
