//! One-pass materialization of DataFrame columns into typed vectors.
//!
//! Binding values chunk-by-chunk straight out of a DataFrame means walking
//! `AnyValue` dispatch per cell; materializing each column once up front
//! keeps the insert loop on plain typed vectors.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::{DataFrame, DataType};

use crate::error::{LoadError, Result};

/// A fully materialized column ready for parameter binding.
#[derive(Debug, Clone)]
pub enum TypedColumn {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Bool(Vec<Option<bool>>),
    Timestamp(Vec<Option<NaiveDateTime>>),
    Date(Vec<Option<NaiveDate>>),
    Text(Vec<Option<String>>),
}

impl TypedColumn {
    /// Number of rows in the column.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Timestamp(v) => v.len(),
            Self::Date(v) => v.len(),
            Self::Text(v) => v.len(),
        }
    }

    /// True when the column has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Materializes every DataFrame column into a typed vector.
///
/// Integer widths are widened to i64; the column order of the DataFrame is
/// preserved.
pub fn materialize_columns(df: &DataFrame) -> Result<Vec<(String, TypedColumn)>> {
    let mut columns = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let name = column.name().to_string();

        let typed = match column.dtype() {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => {
                let widened = column.cast(&DataType::Int64)?;
                let series = widened.as_materialized_series();
                TypedColumn::Int(series.i64()?.into_iter().collect())
            }
            DataType::Float32 | DataType::Float64 => {
                let widened = column.cast(&DataType::Float64)?;
                let series = widened.as_materialized_series();
                TypedColumn::Float(series.f64()?.into_iter().collect())
            }
            DataType::Boolean => {
                let series = column.as_materialized_series();
                TypedColumn::Bool(series.bool()?.into_iter().collect())
            }
            DataType::Datetime(_, _) => {
                let series = column.as_materialized_series();
                TypedColumn::Timestamp(series.datetime()?.as_datetime_iter().collect())
            }
            DataType::Date => {
                let series = column.as_materialized_series();
                TypedColumn::Date(series.date()?.as_date_iter().collect())
            }
            DataType::String => {
                let series = column.as_materialized_series();
                TypedColumn::Text(
                    series
                        .str()?
                        .iter()
                        .map(|opt| opt.map(String::from))
                        .collect(),
                )
            }
            other => {
                return Err(LoadError::UnsupportedType {
                    column: name,
                    dtype: other.to_string(),
                });
            }
        };

        columns.push((name, typed));
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::df;

    #[test]
    fn materializes_mixed_frame() {
        let frame = df!(
            "id" => &[Some(1i64), None, Some(3)],
            "score" => &[Some(1.5f64), Some(2.5), None],
            "name" => &[Some("a"), None, Some("c")]
        )
        .unwrap();

        let columns = materialize_columns(&frame).unwrap();

        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].0, "id");
        match &columns[0].1 {
            TypedColumn::Int(values) => assert_eq!(values, &vec![Some(1), None, Some(3)]),
            other => panic!("expected Int, got {other:?}"),
        }
        match &columns[2].1 {
            TypedColumn::Text(values) => {
                assert_eq!(
                    values,
                    &vec![Some("a".to_string()), None, Some("c".to_string())]
                );
            }
            other => panic!("expected Text, got {other:?}"),
        }
    }

    #[test]
    fn widens_small_integers() {
        let frame = df!("n" => &[1i32, 2, 3]).unwrap();
        let columns = materialize_columns(&frame).unwrap();

        match &columns[0].1 {
            TypedColumn::Int(values) => assert_eq!(values, &vec![Some(1), Some(2), Some(3)]),
            other => panic!("expected Int, got {other:?}"),
        }
    }

    #[test]
    fn preserves_column_order_and_length() {
        let frame = df!(
            "b" => &["x", "y"],
            "a" => &[1i64, 2]
        )
        .unwrap();

        let columns = materialize_columns(&frame).unwrap();

        assert_eq!(columns[0].0, "b");
        assert_eq!(columns[1].0, "a");
        assert_eq!(columns[0].1.len(), 2);
        assert!(!columns[0].1.is_empty());
    }
}
