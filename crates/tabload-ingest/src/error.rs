//! Error types for file ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering, decoding, or parsing input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// Encoding label not recognized by encoding_rs.
    #[error("unknown encoding label '{label}'")]
    UnknownEncoding { label: String },

    /// File uses an encoding the reader does not support.
    #[error("unsupported encoding {encoding} in {path}")]
    UnsupportedEncoding {
        path: PathBuf,
        encoding: &'static str,
    },

    // === Parsing Errors ===
    /// File has no content, or a header row but no data rows.
    #[error("no data rows in {path}")]
    EmptyFile { path: PathBuf },

    /// Failed to parse the delimited content with Polars.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    // === Stacking Errors ===
    /// No input files were provided.
    #[error("no input files to ingest")]
    NoInput,

    /// Failed DataFrame operation while stacking.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
