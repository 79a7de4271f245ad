//! Date column detection and conversion.
//!
//! A column is a date candidate when its name starts or ends with `dt` or
//! `date`, or when its first non-null value looks like three numeric pieces
//! joined by non-alphanumeric separators. Candidate values are parsed
//! against a fixed list of common formats; unparseable values become null.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{AnyValue, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use regex::Regex;
use tracing::{info, warn};

use tabload_common::any_to_string;

use crate::error::Result;

/// Three numeric pieces with non-alphanumeric separators, e.g. `2024-01-31`
/// or `1/31/24`. Anchored so the whole trimmed value must match.
static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,4})[^0-9a-zA-Z](\d{1,4})[^0-9a-zA-Z](\d{1,4})$").unwrap()
});

/// Datetime formats tried before date-only formats.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Date-only formats; parsed values get a midnight time component.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m/%d/%y",
    "%Y%m%d",
];

/// Outcome of converting one column.
#[derive(Debug, Clone)]
pub struct DateConversion {
    /// Column name.
    pub column: String,
    /// Values that parsed.
    pub parsed: usize,
    /// Non-null values considered.
    pub total: usize,
    /// Whether the column was replaced by a datetime column.
    pub converted: bool,
}

/// Returns true when a column name marks it as a date candidate.
pub fn name_is_date_like(name: &str) -> bool {
    let lower = name.to_lowercase();
    ["dt", "date"]
        .iter()
        .any(|piece| lower.starts_with(piece) || lower.ends_with(piece))
}

/// Returns true when a value has the three-piece date shape.
pub fn value_is_date_like(value: &str) -> bool {
    DATE_SHAPE.is_match(value.trim())
}

/// Parses a single value against the known datetime and date formats.
pub fn parse_datetime_value(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// First non-null value of a column, rendered as a string.
fn first_non_null_value(df: &DataFrame, name: &str) -> Option<String> {
    let column = df.column(name).ok()?;
    for idx in 0..column.len() {
        let value = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
        if !value.trim().is_empty() {
            return Some(value);
        }
    }
    None
}

/// Detects date candidate columns and converts them to datetime in place.
///
/// String columns qualify by name or by the shape of their first non-null
/// value; other non-temporal columns qualify by name only (covers numeric
/// stamps like `20240131` in a `load_date` column). A candidate where not a
/// single value parses is kept unchanged and logged, rather than being
/// replaced by an all-null column.
pub fn convert_dates(df: &mut DataFrame) -> Result<Vec<DateConversion>> {
    let mut conversions = Vec::new();

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    for name in names {
        let dtype = df.column(&name)?.dtype().clone();

        let candidate = match dtype {
            DataType::String => {
                name_is_date_like(&name)
                    || first_non_null_value(df, &name)
                        .is_some_and(|value| value_is_date_like(&value))
            }
            DataType::Date | DataType::Datetime(_, _) => false,
            _ => name_is_date_like(&name),
        };

        if !candidate {
            continue;
        }

        let column = df.column(&name)?;
        let mut parsed_count = 0usize;
        let mut total = 0usize;
        let mut values: Vec<Option<NaiveDateTime>> = Vec::with_capacity(column.len());

        for idx in 0..column.len() {
            let raw = any_to_string(column.get(idx).unwrap_or(AnyValue::Null));
            if raw.trim().is_empty() {
                values.push(None);
                continue;
            }
            total += 1;
            let parsed = parse_datetime_value(&raw);
            if parsed.is_some() {
                parsed_count += 1;
            }
            values.push(parsed);
        }

        let converted = parsed_count > 0;
        if converted {
            let series = Series::new(name.as_str().into(), values);
            df.with_column(series.into_column())?;
            info!(
                column = name.as_str(),
                parsed = parsed_count,
                total,
                "converted column to datetime"
            );
        } else {
            warn!(
                column = name.as_str(),
                total, "date candidate had no parseable values, keeping as-is"
            );
        }

        conversions.push(DateConversion {
            column: name,
            parsed: parsed_count,
            total,
            converted,
        });
    }

    Ok(conversions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    #[test]
    fn name_detection_matches_prefix_and_suffix() {
        assert!(name_is_date_like("date_of_birth"));
        assert!(name_is_date_like("dt_created"));
        assert!(name_is_date_like("order_date"));
        assert!(name_is_date_like("created_dt"));
        assert!(!name_is_date_like("updated"));
        assert!(!name_is_date_like("candidate"));
    }

    #[test]
    fn value_shape_detection() {
        assert!(value_is_date_like("2024-01-31"));
        assert!(value_is_date_like("1/31/24"));
        assert!(value_is_date_like(" 2024.01.31 "));
        assert!(!value_is_date_like("2024-01-31 10:00:00"));
        assert!(!value_is_date_like("abc"));
        assert!(!value_is_date_like("12345"));
    }

    #[test]
    fn parses_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_datetime_value("2024-01-31"), Some(expected));
        assert_eq!(parse_datetime_value("2024/01/31"), Some(expected));
        assert_eq!(parse_datetime_value("01/31/2024"), Some(expected));
        assert_eq!(parse_datetime_value("20240131"), Some(expected));

        let with_time = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(parse_datetime_value("2024-01-31 10:30:00"), Some(with_time));
        assert_eq!(parse_datetime_value("01/31/2024 10:30"), Some(with_time));
    }

    #[test]
    fn unparseable_values_return_none() {
        assert_eq!(parse_datetime_value(""), None);
        assert_eq!(parse_datetime_value("not a date"), None);
        assert_eq!(parse_datetime_value("99/99/9999"), None);
    }

    #[test]
    fn converts_name_matched_column() {
        let mut frame = df!(
            "order_date" => &["2024-01-01", "2024-01-02", "bad"],
            "note" => &["a", "b", "c"]
        )
        .unwrap();

        let conversions = convert_dates(&mut frame).unwrap();

        assert_eq!(conversions.len(), 1);
        assert!(conversions[0].converted);
        assert_eq!(conversions[0].parsed, 2);
        assert_eq!(conversions[0].total, 3);
        assert!(matches!(
            frame.column("order_date").unwrap().dtype(),
            DataType::Datetime(_, _)
        ));
        // Unparseable value coerced to null
        assert!(frame.column("order_date").unwrap().get(2).unwrap().is_null());
        // Non-candidate untouched
        assert_eq!(frame.column("note").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn converts_value_matched_column() {
        // Name gives nothing away, first value has the date shape
        let mut frame = df!(
            "received" => &["2024-03-05", "2024-03-06"]
        )
        .unwrap();

        let conversions = convert_dates(&mut frame).unwrap();

        assert_eq!(conversions.len(), 1);
        assert!(conversions[0].converted);
    }

    #[test]
    fn keeps_column_when_nothing_parses() {
        // Name matches but values are free text
        let mut frame = df!(
            "update_date" => &["next week", "soon"]
        )
        .unwrap();

        let conversions = convert_dates(&mut frame).unwrap();

        assert_eq!(conversions.len(), 1);
        assert!(!conversions[0].converted);
        assert_eq!(frame.column("update_date").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn skips_non_candidate_numeric_columns() {
        let mut frame = df!(
            "amount" => &[1i64, 2, 3]
        )
        .unwrap();

        let conversions = convert_dates(&mut frame).unwrap();
        assert!(conversions.is_empty());
    }
}
