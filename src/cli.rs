//! Command-line interface
//!
//! Argument parsing for the sweep binary. Flags overlay the configuration
//! loaded from the config file (or its defaults). Help and version text
//! exit through clap's own channel, separate from error signaling.

use crate::config::{StrategyKind, SweepConfig};
use crate::util::units::parse_size;
use clap::Parser;
use std::path::PathBuf;

fn parse_strategy(s: &str) -> Result<StrategyKind, String> {
    s.parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "disksweep",
    version,
    about = "Sequential disk throughput sweep benchmark"
)]
pub struct Cli {
    /// Minimum file size, with optional K/M/G suffix (default: 1M)
    #[arg(long = "min", value_name = "SIZE", value_parser = parse_size)]
    pub min_size: Option<u64>,

    /// Maximum file size, with optional K/M/G suffix (default: 10M)
    #[arg(long = "max", value_name = "SIZE", value_parser = parse_size)]
    pub max_size: Option<u64>,

    /// Stride between tested sizes, with optional K/M/G suffix (default: 1M)
    #[arg(short = 's', long = "stride", value_name = "SIZE", value_parser = parse_size)]
    pub stride_size: Option<u64>,

    /// Memory buffer size, with optional K/M/G suffix (default: 1M)
    #[arg(long = "buf", value_name = "SIZE", value_parser = parse_size)]
    pub buffer_size: Option<u64>,

    /// I/O strategy: rw (direct read/write), fs (buffered stream), mm (mmap)
    #[arg(short = 'f', long = "func", value_name = "STRATEGY", value_parser = parse_strategy)]
    pub strategy: Option<StrategyKind>,

    /// Number of write-then-read iterations per size point (default: 1)
    #[arg(short = 'n', long = "iterations", value_name = "N")]
    pub iterations: Option<u32>,

    /// Run against a temporary RAM disk
    #[arg(short = 'r', long = "ram-disk")]
    pub use_ram_disk: bool,

    /// Render the results as an SVG chart
    #[arg(short = 'p', long = "plot")]
    pub plot: bool,

    /// Target directory for temporary files when not using the RAM disk
    #[arg(long = "target", value_name = "DIR", default_value = ".")]
    pub target: PathBuf,

    /// Persist the effective configuration as the new default
    #[arg(long = "save-config")]
    pub save_config: bool,

    /// Skip appending this run to the results history
    #[arg(long = "no-save")]
    pub no_save: bool,
}

impl Cli {
    /// Overlay the parsed flags onto a base configuration.
    pub fn into_config(self, base: SweepConfig) -> SweepConfig {
        SweepConfig {
            min_size: self.min_size.unwrap_or(base.min_size),
            max_size: self.max_size.unwrap_or(base.max_size),
            stride_size: self.stride_size.unwrap_or(base.stride_size),
            buffer_size: self.buffer_size.unwrap_or(base.buffer_size),
            iterations: self.iterations.unwrap_or(base.iterations),
            strategy: self.strategy.unwrap_or(base.strategy),
            use_ram_disk: self.use_ram_disk || base.use_ram_disk,
            plot: self.plot || base.plot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fall_through_to_base() {
        let cli = Cli::parse_from(["disksweep"]);
        let config = cli.into_config(SweepConfig::default());
        assert_eq!(config.min_size, 1024 * 1024);
        assert_eq!(config.max_size, 10 * 1024 * 1024);
        assert_eq!(config.strategy, StrategyKind::Direct);
        assert!(!config.use_ram_disk);
    }

    #[test]
    fn test_flags_override_base() {
        let cli = Cli::parse_from([
            "disksweep", "--min", "2M", "--max", "8M", "-s", "2M", "--buf", "512K", "-f", "mm",
            "-n", "3", "-r", "-p",
        ]);
        let config = cli.into_config(SweepConfig::default());
        assert_eq!(config.min_size, 2 * 1024 * 1024);
        assert_eq!(config.max_size, 8 * 1024 * 1024);
        assert_eq!(config.stride_size, 2 * 1024 * 1024);
        assert_eq!(config.buffer_size, 512 * 1024);
        assert_eq!(config.strategy, StrategyKind::MemoryMapped);
        assert_eq!(config.iterations, 3);
        assert!(config.use_ram_disk);
        assert!(config.plot);
    }

    #[test]
    fn test_bad_size_rejected() {
        assert!(Cli::try_parse_from(["disksweep", "--min", "1X"]).is_err());
    }

    #[test]
    fn test_bad_strategy_rejected() {
        assert!(Cli::try_parse_from(["disksweep", "-f", "zz"]).is_err());
    }
}
