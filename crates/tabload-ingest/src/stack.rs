//! Stacking multiple input files into one DataFrame.

use std::path::PathBuf;

use polars::functions::concat_df_diagonal;
use polars::prelude::DataFrame;
use tracing::info;

use crate::error::{IngestError, Result};
use crate::read::{ReadOptions, read_table};

/// Reads every input file and concatenates them into a single DataFrame.
///
/// The first file fixes the leading column order; columns introduced by
/// later files are appended in encounter order and back-filled with nulls
/// for rows from files that lack them.
pub fn stack_tables(paths: &[PathBuf], options: &ReadOptions) -> Result<DataFrame> {
    if paths.is_empty() {
        return Err(IngestError::NoInput);
    }

    info!(files = paths.len(), "reading input files");

    let mut frames = Vec::with_capacity(paths.len());
    let mut seen_columns: Vec<String> = Vec::new();
    let mut total_rows = 0usize;

    for (index, path) in paths.iter().enumerate() {
        let df = read_table(path, options)?;
        total_rows += df.height();

        info!(
            file = %path.display(),
            number = index + 1,
            of = paths.len(),
            rows = df.height(),
            total_rows,
            "read file"
        );

        for name in df.get_column_names() {
            if !seen_columns.iter().any(|seen| seen.as_str() == name.as_str()) {
                if index > 0 {
                    info!(column = name.as_str(), file = %path.display(), "new column");
                }
                seen_columns.push(name.to_string());
            }
        }

        frames.push(df);
    }

    let stacked = concat_df_diagonal(&frames)?;

    info!(
        rows = stacked.height(),
        columns = stacked.width(),
        "stacked input files"
    );

    Ok(stacked)
}
