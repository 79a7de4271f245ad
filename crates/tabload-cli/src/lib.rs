//! CLI library components for tabload.

pub mod logging;
pub mod pipeline;
pub mod summary;
