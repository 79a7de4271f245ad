//! The load pipeline with explicit stages.
//!
//! Stages run in order:
//! 1. **Collect**: resolve explicit files and directory listings
//! 2. **Ingest**: read and stack every input into one DataFrame
//! 3. **Clean**: values, column names, date columns, string widths
//! 4. **Load**: create/verify the destination table and insert in chunks
//!
//! Each stage takes the output of the previous stage and returns typed
//! results; `--dry-run` stops after the clean stage.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::info;

use tabload_clean::{
    ColumnRename, DateConversion, WidthReport, clean_columns, clean_values, convert_dates,
    infer_widths,
};
use tabload_ingest::{ReadOptions, list_delimited_files, stack_tables};
use tabload_load::{LoadMode, LoadOptions, TableSchema, connect, load};

/// Everything the pipeline needs for one run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Explicit input files.
    pub files: Vec<PathBuf>,
    /// Directories to scan for delimited files.
    pub dirs: Vec<PathBuf>,
    /// Read options (separator, encoding).
    pub read: ReadOptions,
    /// Destination connection URL; may be absent for dry runs.
    pub database_url: Option<String>,
    /// Destination table name.
    pub table: String,
    /// Existing-table handling.
    pub mode: LoadMode,
    /// Maximum rows per INSERT statement.
    pub batch_size: usize,
    /// Stop after cleaning; never touch the database.
    pub dry_run: bool,
}

/// Result of the clean stage.
#[derive(Debug)]
pub struct CleanOutcome {
    pub renames: Vec<ColumnRename>,
    pub dates: Vec<DateConversion>,
    pub widths: WidthReport,
}

/// Per-stage wall-clock durations.
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    pub ingest: Duration,
    pub clean: Duration,
    pub load: Option<Duration>,
}

/// Everything the summary needs to report one run.
#[derive(Debug)]
pub struct RunSummary {
    pub table: String,
    pub files: Vec<PathBuf>,
    pub rows: usize,
    pub columns: usize,
    pub renames: Vec<ColumnRename>,
    pub dates: Vec<DateConversion>,
    pub widths: WidthReport,
    pub schema: TableSchema,
    /// None for dry runs.
    pub rows_loaded: Option<u64>,
    pub timings: StageTimings,
}

/// Resolves explicit files plus directory listings into one input list.
///
/// Explicit files keep their given order; each directory contributes its
/// delimited files sorted by name.
pub fn collect_inputs(files: &[PathBuf], dirs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = files.to_vec();

    for dir in dirs {
        let discovered = list_delimited_files(dir)
            .with_context(|| format!("list input files in {}", dir.display()))?;
        inputs.extend(discovered);
    }

    if inputs.is_empty() {
        bail!("no input files: pass --file and/or --dir");
    }

    Ok(inputs)
}

/// Runs the clean stage over a stacked DataFrame in place.
pub fn clean(df: &mut DataFrame) -> Result<CleanOutcome> {
    clean_values(df).context("clean values")?;
    let renames = clean_columns(df).context("clean column names")?;
    let dates = convert_dates(df).context("convert date columns")?;
    let widths = infer_widths(df).context("infer string widths")?;

    Ok(CleanOutcome {
        renames,
        dates,
        widths,
    })
}

/// Runs the whole pipeline and returns the run summary.
pub async fn run(options: &PipelineOptions) -> Result<RunSummary> {
    let inputs = collect_inputs(&options.files, &options.dirs)?;

    let ingest_start = Instant::now();
    let mut df = stack_tables(&inputs, &options.read).context("ingest input files")?;
    let ingest_elapsed = ingest_start.elapsed();

    let clean_start = Instant::now();
    let outcome = clean(&mut df)?;
    let schema = TableSchema::from_frame(&df, &outcome.widths).context("map table schema")?;
    let clean_elapsed = clean_start.elapsed();

    info!(
        rows = df.height(),
        columns = df.width(),
        renamed = outcome.renames.len(),
        date_columns = outcome.dates.iter().filter(|d| d.converted).count(),
        "cleaning complete"
    );

    let mut load_elapsed = None;
    let rows_loaded = if options.dry_run {
        info!("dry run, skipping database load");
        None
    } else {
        let url = options
            .database_url
            .as_deref()
            .context("--database-url (or DATABASE_URL) is required unless --dry-run")?;

        let load_start = Instant::now();
        let pool = connect(url).await.context("connect to database")?;
        let load_options = LoadOptions {
            mode: options.mode,
            batch_size: options.batch_size,
        };
        let inserted = load(&pool, &df, &options.table, &schema, &load_options)
            .await
            .with_context(|| format!("load table '{}'", options.table))?;
        load_elapsed = Some(load_start.elapsed());
        Some(inserted)
    };

    Ok(RunSummary {
        table: options.table.clone(),
        files: inputs,
        rows: df.height(),
        columns: df.width(),
        renames: outcome.renames,
        dates: outcome.dates,
        widths: outcome.widths,
        schema,
        rows_loaded,
        timings: StageTimings {
            ingest: ingest_elapsed,
            clean: clean_elapsed,
            load: load_elapsed,
        },
    })
}
