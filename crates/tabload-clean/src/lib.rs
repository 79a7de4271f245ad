//! DataFrame cleaning for SQL loading.
//!
//! Four single-pass transformations that prepare a stacked DataFrame for a
//! relational table:
//!
//! - **Value cleaning**: strip non-ASCII characters, null out blank values
//! - **Column cleaning**: SQL-safe, deduplicated, lowercase column names
//! - **Date conversion**: detect and parse date-like columns to datetime
//! - **Width inference**: measure string columns for VARCHAR sizing
//!
//! # Example
//!
//! ```ignore
//! use tabload_clean::{clean_values, clean_columns, convert_dates, infer_widths};
//!
//! clean_values(&mut df)?;
//! let renames = clean_columns(&mut df)?;
//! let dates = convert_dates(&mut df)?;
//! let widths = infer_widths(&df)?;
//! ```

mod columns;
mod dates;
mod error;
mod values;
mod widths;

// === Error Types ===
pub use error::{CleanError, Result};

// === Value Cleaning ===
pub use values::clean_values;

// === Column Names ===
pub use columns::{ColumnRename, clean_column_name, clean_columns};

// === Date Conversion ===
pub use dates::{
    DateConversion, convert_dates, name_is_date_like, parse_datetime_value, value_is_date_like,
};

// === Width Inference ===
pub use widths::{ColumnWidth, MAX_VARCHAR_LEN, WidthReport, infer_widths};
