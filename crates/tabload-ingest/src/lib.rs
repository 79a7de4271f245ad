//! Delimited file ingestion.
//!
//! This crate discovers delimited text files, decodes them to UTF-8, parses
//! them with Polars, and stacks multiple files into one DataFrame for the
//! cleaning pipeline.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabload_ingest::{ReadOptions, list_delimited_files, stack_tables};
//!
//! let files = list_delimited_files(Path::new("exports/"))?;
//! let df = stack_tables(&files, &ReadOptions::default())?;
//! ```

mod discovery;
mod error;
mod read;
mod stack;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::list_delimited_files;

// === Reading & Stacking ===
pub use read::{INFER_SCHEMA_ROWS, ReadOptions, read_table};
pub use stack::stack_tables;
