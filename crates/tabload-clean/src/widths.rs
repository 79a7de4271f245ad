//! String width inference for VARCHAR sizing.

use polars::prelude::{DataFrame, DataType};
use tracing::{debug, warn};

use crate::error::Result;

/// Widest column that still maps to VARCHAR; anything longer loads as TEXT.
pub const MAX_VARCHAR_LEN: usize = 4000;

/// Inferred width of one string column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnWidth {
    /// Column name.
    pub name: String,
    /// Maximum character count observed (0 for all-null columns).
    pub max_chars: usize,
    /// True when the column exceeds [`MAX_VARCHAR_LEN`].
    pub oversize: bool,
}

/// Width decisions for every string column, in column order.
#[derive(Debug, Clone, Default)]
pub struct WidthReport {
    pub columns: Vec<ColumnWidth>,
}

impl WidthReport {
    /// Looks up the width entry for a column.
    pub fn get(&self, name: &str) -> Option<&ColumnWidth> {
        self.columns.iter().find(|width| width.name == name)
    }
}

/// Measures the maximum character length of every string column.
///
/// Columns wider than [`MAX_VARCHAR_LEN`] are flagged and logged; the load
/// stage maps them to TEXT instead of VARCHAR. Values are never truncated.
pub fn infer_widths(df: &DataFrame) -> Result<WidthReport> {
    let mut report = WidthReport::default();

    for column in df.get_columns() {
        if column.dtype() != &DataType::String {
            continue;
        }

        let name = column.name().to_string();
        let chunked = column.str()?;

        let max_chars = chunked
            .iter()
            .flatten()
            .map(|value| value.chars().count())
            .max()
            .unwrap_or(0);

        let oversize = max_chars > MAX_VARCHAR_LEN;
        if oversize {
            warn!(
                column = name.as_str(),
                max_chars, "column exceeds varchar limit, loading as TEXT"
            );
        } else {
            debug!(column = name.as_str(), max_chars, "inferred varchar width");
        }

        report.columns.push(ColumnWidth {
            name,
            max_chars,
            oversize,
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    #[test]
    fn measures_max_character_length() {
        let frame = df!(
            "short" => &["a", "bb", "ccc"],
            "longer" => &["hello world", "x", "y"]
        )
        .unwrap();

        let report = infer_widths(&frame).unwrap();

        assert_eq!(report.get("short").unwrap().max_chars, 3);
        assert_eq!(report.get("longer").unwrap().max_chars, 11);
        assert!(!report.get("short").unwrap().oversize);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let frame = df!("s" => &["日本語"]).unwrap();
        let report = infer_widths(&frame).unwrap();

        assert_eq!(report.get("s").unwrap().max_chars, 3);
    }

    #[test]
    fn flags_oversize_columns() {
        let long = "x".repeat(MAX_VARCHAR_LEN + 1);
        let frame = df!("blob" => &[long.as_str()]).unwrap();

        let report = infer_widths(&frame).unwrap();

        assert!(report.get("blob").unwrap().oversize);
        assert_eq!(report.get("blob").unwrap().max_chars, MAX_VARCHAR_LEN + 1);
    }

    #[test]
    fn all_null_column_has_zero_width() {
        let frame = df!("s" => &[None::<&str>, None]).unwrap();
        let report = infer_widths(&frame).unwrap();

        assert_eq!(report.get("s").unwrap().max_chars, 0);
    }

    #[test]
    fn skips_non_string_columns() {
        let frame = df!(
            "n" => &[1i64, 2],
            "s" => &["a", "b"]
        )
        .unwrap();

        let report = infer_widths(&frame).unwrap();

        assert_eq!(report.columns.len(), 1);
        assert_eq!(report.columns[0].name, "s");
    }
}
