//! SQL schema mapping from a cleaned DataFrame.

use std::fmt;

use polars::prelude::{DataFrame, DataType};

use tabload_clean::WidthReport;

use crate::error::{LoadError, Result};

/// SQL column type for the destination table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlType {
    BigInt,
    DoublePrecision,
    Boolean,
    Timestamp,
    Date,
    Varchar(usize),
    Text,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BigInt => write!(f, "BIGINT"),
            Self::DoublePrecision => write!(f, "DOUBLE PRECISION"),
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::Timestamp => write!(f, "TIMESTAMP"),
            Self::Date => write!(f, "DATE"),
            Self::Varchar(len) => write!(f, "VARCHAR({len})"),
            Self::Text => write!(f, "TEXT"),
        }
    }
}

/// One destination column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub sql_type: SqlType,
}

/// Ordered destination table schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: Vec<ColumnSpec>,
}

impl TableSchema {
    /// Derives the SQL schema from DataFrame dtypes and the width report.
    ///
    /// String columns within the varchar limit become `VARCHAR(n)` with `n`
    /// being the widest observed value (minimum 1); oversize or unmeasured
    /// string columns become `TEXT`.
    pub fn from_frame(df: &DataFrame, widths: &WidthReport) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());

        for column in df.get_columns() {
            let name = column.name().to_string();
            let sql_type = match column.dtype() {
                DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64 => SqlType::BigInt,
                DataType::Float32 | DataType::Float64 => SqlType::DoublePrecision,
                DataType::Boolean => SqlType::Boolean,
                DataType::Datetime(_, _) => SqlType::Timestamp,
                DataType::Date => SqlType::Date,
                DataType::String => match widths.get(&name) {
                    Some(width) if !width.oversize => SqlType::Varchar(width.max_chars.max(1)),
                    _ => SqlType::Text,
                },
                other => {
                    return Err(LoadError::UnsupportedType {
                        column: name,
                        dtype: other.to_string(),
                    });
                }
            };

            columns.push(ColumnSpec { name, sql_type });
        }

        Ok(Self { columns })
    }

    /// Renders the CREATE TABLE statement with quoted identifiers.
    pub fn create_table_sql(&self, table: &str) -> String {
        let columns: Vec<String> = self
            .columns
            .iter()
            .map(|col| format!("{} {}", quote_ident(&col.name), col.sql_type))
            .collect();
        format!(
            "CREATE TABLE {} ({})",
            quote_ident(table),
            columns.join(", ")
        )
    }

    /// Renders the quoted, comma-separated column list for INSERT.
    pub fn column_list_sql(&self) -> String {
        self.columns
            .iter()
            .map(|col| quote_ident(&col.name))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Quotes an SQL identifier, doubling any embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
