//! Benchmark engine module
//!
//! Contains the size-sweep driver and the temporary-file cleanup guard.

pub mod cleanup;
pub mod sweep;

// Re-export commonly used types
pub use cleanup::TempFileSet;
pub use sweep::SweepDriver;
