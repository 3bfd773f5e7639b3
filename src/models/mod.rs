//! Data models module
//!
//! Contains the sweep result data models consumed by reporting,
//! plotting, and persistence.

pub mod result;

// Re-export commonly used types
pub use result::{ResultSeries, RunRecord, SizePoint};
