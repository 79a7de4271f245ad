//! Cell value cleaning for string columns.

use polars::prelude::{DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use crate::error::Result;

/// Cleans every string column in place.
///
/// For each value: all non-ASCII characters are removed, and values that are
/// empty or whitespace-only after that become null. Non-string columns pass
/// through untouched.
pub fn clean_values(df: &mut DataFrame) -> Result<()> {
    let string_columns: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|col| col.dtype() == &DataType::String)
        .map(|col| col.name().to_string())
        .collect();

    for name in &string_columns {
        let column = df.column(name)?;
        let chunked = column.str()?;

        let mut changed = 0usize;
        let cleaned: Vec<Option<String>> = chunked
            .iter()
            .map(|opt| {
                let value = opt?;
                let ascii: String = value.chars().filter(char::is_ascii).collect();
                if ascii.trim().is_empty() {
                    changed += 1;
                    None
                } else {
                    if ascii.len() != value.len() {
                        changed += 1;
                    }
                    Some(ascii)
                }
            })
            .collect();

        if changed > 0 {
            debug!(column = name.as_str(), values = changed, "cleaned values");
        }

        let series = Series::new(name.as_str().into(), cleaned);
        df.with_column(series.into_column())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    #[test]
    fn strips_non_ascii_characters() {
        let mut frame = df!("name" => &["café", "naïve", "plain"]).unwrap();
        clean_values(&mut frame).unwrap();

        let col = frame.column("name").unwrap();
        let values: Vec<_> = col.str().unwrap().iter().flatten().collect();
        assert_eq!(values, vec!["caf", "nave", "plain"]);
    }

    #[test]
    fn whitespace_only_becomes_null() {
        let mut frame = df!("name" => &["  ", "\t", "ok", ""]).unwrap();
        clean_values(&mut frame).unwrap();

        let col = frame.column("name").unwrap();
        let chunked = col.str().unwrap();
        assert!(chunked.get(0).is_none());
        assert!(chunked.get(1).is_none());
        assert_eq!(chunked.get(2), Some("ok"));
        assert!(chunked.get(3).is_none());
    }

    #[test]
    fn value_reduced_to_whitespace_becomes_null() {
        // Entirely non-ASCII value collapses to empty
        let mut frame = df!("name" => &["日本語", "keep"]).unwrap();
        clean_values(&mut frame).unwrap();

        let col = frame.column("name").unwrap();
        let chunked = col.str().unwrap();
        assert!(chunked.get(0).is_none());
        assert_eq!(chunked.get(1), Some("keep"));
    }

    #[test]
    fn numeric_columns_untouched() {
        let mut frame = df!("n" => &[1i64, 2, 3]).unwrap();
        clean_values(&mut frame).unwrap();

        assert_eq!(frame.column("n").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn interior_whitespace_preserved() {
        let mut frame = df!("name" => &["a b", " padded "]).unwrap();
        clean_values(&mut frame).unwrap();

        let col = frame.column("name").unwrap();
        let chunked = col.str().unwrap();
        assert_eq!(chunked.get(0), Some("a b"));
        assert_eq!(chunked.get(1), Some(" padded "));
    }
}
