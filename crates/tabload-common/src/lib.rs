//! Shared helpers for the tabload workspace.
//!
//! Currently limited to Polars `AnyValue` conversions used by both the
//! cleaning and loading stages.

mod polars;

pub use polars::{any_to_string, format_numeric};
