//! disksweep - sequential disk throughput sweep benchmark
//!
//! Measures sustained sequential write and read throughput of a storage
//! volume across a sweep of file sizes, using one of three I/O strategies
//! (direct unbuffered syscalls, buffered stream I/O, memory-mapped I/O
//! with per-chunk synchronization) per invocation.

use std::fmt;

// Public re-exports
pub mod bench;
pub mod cli;
pub mod config;
pub mod io;
pub mod models;
pub mod plot;
pub mod util;
pub mod volume;

/// Detailed cause of a RAM volume lifecycle failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VolumeError {
    /// Creating the RAM-backed device failed
    DeviceCreateFailed(String),
    /// Formatting/mounting the device as a volume failed
    MountFailed(String),
    /// The volume never appeared at its expected mount point
    VolumeNotFound(String),
    /// Ejecting the volume failed
    EjectFailed(String),
    /// The volume is still mounted after an eject attempt
    StillMounted(String),
    /// RAM volumes are not supported on this platform
    Unsupported(String),
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolumeError::DeviceCreateFailed(msg) => {
                write!(f, "failed to create RAM disk device: {}", msg)
            }
            VolumeError::MountFailed(msg) => write!(f, "failed to mount RAM disk: {}", msg),
            VolumeError::VolumeNotFound(msg) => write!(f, "RAM disk not found: {}", msg),
            VolumeError::EjectFailed(msg) => write!(f, "error ejecting RAM disk: {}", msg),
            VolumeError::StillMounted(msg) => write!(f, "RAM disk still mounted: {}", msg),
            VolumeError::Unsupported(msg) => write!(f, "RAM disk unsupported: {}", msg),
        }
    }
}

// Common error types
#[derive(Debug)]
pub enum SweepError {
    /// Configuration validation or parsing error
    ConfigError(String),
    /// An OS-level call failed during a write or read phase.
    /// Carries the name of the failing operation; fatal to the run.
    IoFailure {
        op: String,
        source: std::io::Error,
    },
    /// RAM volume creation/mount/eject failure
    VolumeError(VolumeError),
    /// Results or configuration persistence error
    PersistenceError(String),
}

impl SweepError {
    /// Wrap an OS error with the name of the operation that produced it.
    pub fn io(op: impl Into<String>, source: std::io::Error) -> Self {
        SweepError::IoFailure {
            op: op.into(),
            source,
        }
    }
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SweepError::IoFailure { op, source } => {
                write!(f, "I/O failure during {}: {}", op, source)
            }
            SweepError::VolumeError(err) => write!(f, "RAM volume error: {}", err),
            SweepError::PersistenceError(msg) => write!(f, "Persistence error: {}", msg),
        }
    }
}

impl std::error::Error for SweepError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SweepError::IoFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<VolumeError> for SweepError {
    fn from(err: VolumeError) -> Self {
        SweepError::VolumeError(err)
    }
}

impl From<serde_json::Error> for SweepError {
    fn from(err: serde_json::Error) -> Self {
        SweepError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for SweepError {
    fn from(err: toml::de::Error) -> Self {
        SweepError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for SweepError {
    fn from(err: toml::ser::Error) -> Self {
        SweepError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for disksweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

// Common types and constants
pub const APP_NAME: &str = "disksweep";
pub const CONFIG_FILE: &str = "disksweep.toml";
pub const RESULTS_FILE: &str = "results.json";
/// Temporary files are named `testfile_{i}.bin` per write iteration; the
/// index keeps files from one size point distinguishable and independently
/// cleanable.
pub const TEMP_FILE_PREFIX: &str = "testfile_";
pub const TEMP_FILE_SUFFIX: &str = ".bin";
pub const MAX_RESULTS_HISTORY: usize = 100;

/// Build the temporary file name for one write iteration.
pub fn temp_file_name(index: u32) -> String {
    format!("{}{}{}", TEMP_FILE_PREFIX, index, TEMP_FILE_SUFFIX)
}
