//! The common contract over the three I/O strategies
//!
//! A strategy writes exactly `size_bytes` to a file through a reusable
//! buffer and reads the same byte count back, returning an 8-bit XOR
//! checksum. The checksum exists to keep the read from being optimized
//! away, not to verify data; collisions are expected and acceptable.

use crate::config::StrategyKind;
use crate::io::{BufferedStrategy, DirectStrategy, MmapStrategy};
use crate::Result;
use std::path::Path;

/// One way of writing `size_bytes` to a file and reading them back.
///
/// All three implementations create or replace the named file; the write
/// path destroys the file's prior contents unconditionally. Any failing
/// OS call propagates immediately as `IoFailure` carrying the operation
/// name; there is no retry at this layer.
pub trait IoStrategy {
    /// Strategy name for reporting
    fn name(&self) -> &'static str;

    /// Write exactly `size_bytes` to `path`, reusing `buffer` as the data
    /// source for every chunk.
    fn write_file(&self, path: &Path, buffer: &[u8], size_bytes: u64) -> Result<()>;

    /// Read `size_bytes` back from `path` into `buffer`, returning the
    /// strategy's checksum over the data it read.
    fn read_file(&self, path: &Path, buffer: &mut [u8], size_bytes: u64) -> Result<u8>;
}

/// Build the strategy selected at configuration time. The returned trait
/// object is held for the whole run.
pub fn create_strategy(kind: StrategyKind) -> Box<dyn IoStrategy> {
    match kind {
        StrategyKind::Direct => Box::new(DirectStrategy),
        StrategyKind::Buffered => Box::new(BufferedStrategy),
        StrategyKind::MemoryMapped => Box::new(MmapStrategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_strategy_names() {
        assert_eq!(create_strategy(StrategyKind::Direct).name(), "read/write");
        assert_eq!(create_strategy(StrategyKind::Buffered).name(), "fstream");
        assert_eq!(create_strategy(StrategyKind::MemoryMapped).name(), "mmap");
    }
}
