//! Column name normalization for SQL.

use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::Result;

/// Reserved words that get a trailing underscore (Oracle heritage, kept for
/// portability across engines).
const RESERVED_WORDS: &[&str] = &[
    "type", "group", "date", "resource", "start", "end", "sysdate",
];

/// A column rename performed by [`clean_columns`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRename {
    pub from: String,
    pub to: String,
}

/// Normalizes a single raw header into an unquoted-safe SQL identifier.
///
/// Trims, lowercases, maps spaces to underscores, and drops every character
/// outside `[a-z0-9_]`. May return an empty string; callers supply the
/// positional fallback.
pub fn clean_column_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_')
        .collect()
}

/// Cleans and deduplicates every column name in the DataFrame.
///
/// Empty results fall back to `col_<index>`, reserved words get a trailing
/// underscore, and repeats are suffixed `_1`, `_2`, ... so the final set is
/// collision-free. Returns the renames that were applied.
pub fn clean_columns(df: &mut DataFrame) -> Result<Vec<ColumnRename>> {
    let original: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut assigned: Vec<String> = Vec::with_capacity(original.len());

    for (index, raw) in original.iter().enumerate() {
        let mut name = clean_column_name(raw);

        if name.is_empty() {
            name = format!("col_{index}");
        }

        if RESERVED_WORDS.contains(&name.as_str()) {
            name.push('_');
        }

        // Deduplicate against everything assigned so far
        if assigned.contains(&name) {
            let mut counter = 1usize;
            loop {
                let candidate = format!("{name}_{counter}");
                if !assigned.contains(&candidate) {
                    name = candidate;
                    break;
                }
                counter += 1;
            }
        }

        assigned.push(name);
    }

    let renames: Vec<ColumnRename> = original
        .iter()
        .zip(&assigned)
        .filter(|(from, to)| from != to)
        .map(|(from, to)| ColumnRename {
            from: from.clone(),
            to: to.clone(),
        })
        .collect();

    for rename in &renames {
        debug!(from = rename.from.as_str(), to = rename.to.as_str(), "renamed column");
    }

    df.set_column_names(assigned.iter().map(String::as_str))?;

    Ok(renames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    fn names(frame: &DataFrame) -> Vec<String> {
        frame
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn clean_column_name_normalizes() {
        assert_eq!(clean_column_name("  First Name  "), "first_name");
        assert_eq!(clean_column_name("Amount($)"), "amount");
        assert_eq!(clean_column_name("UPPER"), "upper");
        assert_eq!(clean_column_name("a-b.c"), "abc");
    }

    #[test]
    fn clean_column_name_may_be_empty() {
        assert_eq!(clean_column_name("???"), "");
        assert_eq!(clean_column_name("  "), "");
    }

    #[test]
    fn cleans_and_reports_renames() {
        let mut frame = df!(
            "First Name" => &["a"],
            "already_clean" => &["b"]
        )
        .unwrap();

        let renames = clean_columns(&mut frame).unwrap();

        assert_eq!(names(&frame), vec!["first_name", "already_clean"]);
        assert_eq!(renames.len(), 1);
        assert_eq!(renames[0].from, "First Name");
        assert_eq!(renames[0].to, "first_name");
    }

    #[test]
    fn empty_name_falls_back_to_position() {
        let mut frame = df!(
            "???" => &["a"],
            "ok" => &["b"]
        )
        .unwrap();

        clean_columns(&mut frame).unwrap();

        assert_eq!(names(&frame), vec!["col_0", "ok"]);
    }

    #[test]
    fn reserved_words_get_trailing_underscore() {
        let mut frame = df!(
            "Type" => &["a"],
            "GROUP" => &["b"],
            "start" => &["c"]
        )
        .unwrap();

        clean_columns(&mut frame).unwrap();

        assert_eq!(names(&frame), vec!["type_", "group_", "start_"]);
    }

    #[test]
    fn duplicates_are_suffixed() {
        let mut frame = df!(
            "Amount" => &["a"],
            "amount" => &["b"],
            "AMOUNT " => &["c"]
        )
        .unwrap();

        clean_columns(&mut frame).unwrap();

        assert_eq!(names(&frame), vec!["amount", "amount_1", "amount_2"]);
    }

    #[test]
    fn dedup_avoids_existing_names() {
        let mut frame = df!(
            "x" => &["a"],
            "x_1" => &["b"],
            "X" => &["c"]
        )
        .unwrap();

        clean_columns(&mut frame).unwrap();

        assert_eq!(names(&frame), vec!["x", "x_1", "x_2"]);
    }
}
