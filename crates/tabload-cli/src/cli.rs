//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabload",
    version,
    about = "Clean delimited text files and bulk-load them into a database table",
    long_about = "Read one or more delimited text files, normalize their contents\n\
                  (encoding, whitespace, column names, date columns, string widths),\n\
                  and bulk-load the result into a Postgres table in batches."
)]
pub struct Cli {
    /// Input file (repeatable).
    #[arg(long = "file", value_name = "PATH")]
    pub files: Vec<PathBuf>,

    /// Directory to pull delimited files from (repeatable).
    #[arg(long = "dir", value_name = "PATH")]
    pub dirs: Vec<PathBuf>,

    /// Destination database connection URL.
    #[arg(long = "database-url", value_name = "URL", env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Destination table name (default: tabload_<timestamp>).
    #[arg(long = "table", value_name = "NAME")]
    pub table: Option<String>,

    /// What to do when the destination table already exists.
    #[arg(long = "mode", value_enum, default_value = "fail")]
    pub mode: ModeArg,

    /// Field separator for the input files.
    #[arg(long = "separator", value_name = "CHAR", default_value = ",")]
    pub separator: String,

    /// Fallback encoding for non-UTF-8 input files (any WHATWG label).
    #[arg(long = "encoding", value_name = "LABEL", default_value = "windows-1252")]
    pub encoding: String,

    /// Maximum rows per INSERT statement.
    #[arg(long = "batch-size", value_name = "N", default_value_t = 1000)]
    pub batch_size: usize,

    /// Ingest and clean only; print the inferred schema without touching
    /// the database.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

/// CLI load mode choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Error if the table exists.
    Fail,
    /// Drop and recreate the table.
    Replace,
    /// Insert into the existing table, creating it if absent.
    Append,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
