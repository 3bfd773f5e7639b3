//! Utility functions module
//!
//! Contains helper functions for size parsing and formatting and for
//! throughput calculation.

pub mod units;

// Re-export commonly used functions
pub use units::{format_bytes, parse_size, throughput_mbs};
