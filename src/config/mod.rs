//! Configuration management module
//!
//! Handles validation, persistence, and defaults for the sweep
//! configuration.

use crate::{Result, SweepError, APP_NAME, CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

pub mod persistence;

/// I/O strategy selected for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyKind {
    /// Unbuffered syscall writes/reads with an OS cache-bypass request
    Direct,
    /// Buffered stream I/O; throughput is expected to be cache-influenced
    Buffered,
    /// Memory-mapped I/O with a synchronous flush per buffer-sized chunk
    MemoryMapped,
}

impl StrategyKind {
    /// Get a human-readable description of the strategy
    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::Direct => "read/write",
            StrategyKind::Buffered => "fstream",
            StrategyKind::MemoryMapped => "mmap",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "rw" => Ok(StrategyKind::Direct),
            "fs" => Ok(StrategyKind::Buffered),
            "mm" => Ok(StrategyKind::MemoryMapped),
            other => Err(format!(
                "unknown strategy '{}' (expected rw, fs or mm)",
                other
            )),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Sweep configuration containing all benchmark parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Smallest tested file size in bytes
    pub min_size: u64,
    /// Largest tested file size in bytes (closed interval)
    pub max_size: u64,
    /// Increment between consecutive tested file sizes in bytes
    pub stride_size: u64,
    /// Reusable write/read buffer size in bytes
    pub buffer_size: u64,
    /// Number of write-then-read iterations per size point
    pub iterations: u32,
    /// I/O strategy for the whole run
    pub strategy: StrategyKind,
    /// Run against a temporary RAM-backed volume
    pub use_ram_disk: bool,
    /// Render the result series as an SVG chart
    pub plot: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_size: 1024 * 1024,       // 1 MiB
            max_size: 10 * 1024 * 1024,  // 10 MiB
            stride_size: 1024 * 1024,    // 1 MiB
            buffer_size: 1024 * 1024,    // 1 MiB
            iterations: 1,
            strategy: StrategyKind::Direct,
            use_ram_disk: false,
            plot: false,
        }
    }
}

impl SweepConfig {
    /// Create a new sweep configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.min_size == 0 {
            return Err(SweepError::ConfigError(
                "minimum size must be greater than 0".to_string(),
            ));
        }

        if self.buffer_size == 0 {
            return Err(SweepError::ConfigError(
                "buffer size must be greater than 0".to_string(),
            ));
        }

        if self.stride_size == 0 {
            return Err(SweepError::ConfigError(
                "stride size must be greater than 0".to_string(),
            ));
        }

        if self.iterations == 0 {
            return Err(SweepError::ConfigError(
                "iterations must be greater than 0".to_string(),
            ));
        }

        if self.min_size > self.max_size {
            return Err(SweepError::ConfigError(
                "minimum size cannot be greater than maximum size".to_string(),
            ));
        }

        if self.stride_size > self.max_size - self.min_size {
            return Err(SweepError::ConfigError(
                "stride size cannot be greater than (maximum size - minimum size)".to_string(),
            ));
        }

        // The mapped strategy iterates whole buffer-sized chunks only; a
        // trailing remainder would never be written or verified, so every
        // tested size must be an exact multiple of the buffer size.
        if self.strategy == StrategyKind::MemoryMapped {
            if self.min_size % self.buffer_size != 0 || self.stride_size % self.buffer_size != 0 {
                return Err(SweepError::ConfigError(
                    "mmap strategy requires minimum and stride sizes to be multiples of the buffer size"
                        .to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Enumerate the swept file sizes: min, min+stride, ... up to and
    /// including max when the stride lands on it exactly.
    pub fn sweep_sizes(&self) -> Vec<u64> {
        let mut sizes = Vec::new();
        let mut size = self.min_size;
        while size <= self.max_size {
            sizes.push(size);
            size += self.stride_size;
        }
        sizes
    }

    /// Number of size points the sweep will produce
    pub fn point_count(&self) -> u64 {
        (self.max_size - self.min_size) / self.stride_size + 1
    }

    /// Set the minimum file size
    pub fn with_min_size(mut self, size: u64) -> Self {
        self.min_size = size;
        self
    }

    /// Set the maximum file size
    pub fn with_max_size(mut self, size: u64) -> Self {
        self.max_size = size;
        self
    }

    /// Set the stride between tested sizes
    pub fn with_stride_size(mut self, size: u64) -> Self {
        self.stride_size = size;
        self
    }

    /// Set the reusable buffer size
    pub fn with_buffer_size(mut self, size: u64) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the number of iterations per size point
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the I/O strategy
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Load configuration from the standard config file location.
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            SweepError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            SweepError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SweepError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| SweepError::ConfigError(format!("Failed to serialize configuration: {}", e)))?;

        fs::write(&config_path, content).map_err(|e| {
            SweepError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/disksweep/disksweep.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            SweepError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SweepConfig::default().validate().is_ok());
    }

    #[test]
    fn test_min_greater_than_max_rejected() {
        let config = SweepConfig::default()
            .with_min_size(10 * 1024 * 1024)
            .with_max_size(1024 * 1024);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SweepError::ConfigError(_)));
    }

    #[test]
    fn test_stride_larger_than_span_rejected() {
        // Rejected up front even though the single starting point could run.
        let config = SweepConfig::default()
            .with_min_size(1024 * 1024)
            .with_max_size(3 * 1024 * 1024)
            .with_stride_size(4 * 1024 * 1024);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_parameters_rejected() {
        assert!(SweepConfig::default().with_min_size(0).validate().is_err());
        assert!(SweepConfig::default().with_buffer_size(0).validate().is_err());
        assert!(SweepConfig::default().with_stride_size(0).validate().is_err());
        assert!(SweepConfig::default().with_iterations(0).validate().is_err());
    }

    #[test]
    fn test_mmap_requires_buffer_multiple_sizes() {
        let config = SweepConfig::default()
            .with_strategy(StrategyKind::MemoryMapped)
            .with_min_size(1024 * 1024 + 100)
            .with_max_size(10 * 1024 * 1024);
        assert!(config.validate().is_err());

        let config = SweepConfig::default()
            .with_strategy(StrategyKind::MemoryMapped)
            .with_stride_size(512 * 1024 + 1)
            .with_buffer_size(1024 * 1024);
        assert!(config.validate().is_err());

        // The same sizes are fine for the other strategies.
        let config = SweepConfig::default()
            .with_strategy(StrategyKind::Direct)
            .with_min_size(1024 * 1024 + 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sweep_sizes_closed_interval() {
        let config = SweepConfig::default()
            .with_min_size(1024 * 1024)
            .with_max_size(3 * 1024 * 1024)
            .with_stride_size(1024 * 1024);
        assert_eq!(
            config.sweep_sizes(),
            vec![1024 * 1024, 2 * 1024 * 1024, 3 * 1024 * 1024]
        );
        assert_eq!(config.point_count(), 3);
    }

    #[test]
    fn test_sweep_sizes_no_trailing_partial_stride() {
        let config = SweepConfig::default()
            .with_min_size(1024 * 1024)
            .with_max_size(5 * 1024 * 1024)
            .with_stride_size(3 * 1024 * 1024);
        assert_eq!(config.sweep_sizes(), vec![1024 * 1024, 4 * 1024 * 1024]);
        assert_eq!(config.point_count(), 2);
    }

    #[test]
    fn test_strategy_kind_parsing() {
        assert_eq!("rw".parse::<StrategyKind>().unwrap(), StrategyKind::Direct);
        assert_eq!("fs".parse::<StrategyKind>().unwrap(), StrategyKind::Buffered);
        assert_eq!(
            "mm".parse::<StrategyKind>().unwrap(),
            StrategyKind::MemoryMapped
        );
        assert!("xx".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SweepConfig::default()
            .with_strategy(StrategyKind::MemoryMapped)
            .with_iterations(3);
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        let deserialized: SweepConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize from TOML");

        assert_eq!(config.min_size, deserialized.min_size);
        assert_eq!(config.max_size, deserialized.max_size);
        assert_eq!(config.stride_size, deserialized.stride_size);
        assert_eq!(config.buffer_size, deserialized.buffer_size);
        assert_eq!(config.iterations, deserialized.iterations);
        assert_eq!(config.strategy, deserialized.strategy);
    }
}
