//! Size-sweep driver
//!
//! Iterates file sizes from the configured minimum to the maximum in
//! fixed strides; for each size, runs the configured number of iterations
//! of write-then-read with the selected strategy, times each phase
//! end-to-end, and emits one result row.
//!
//! Everything here is single-threaded and blocking, deliberately:
//! interleaving writes and reads would corrupt the throughput
//! measurement. Each phase is bounded by one start/stop pair of a
//! monotonic clock rather than per-file timing, so timer overhead does
//! not skew results on very small files.

use crate::bench::TempFileSet;
use crate::config::SweepConfig;
use crate::io::IoStrategy;
use crate::models::{ResultSeries, SizePoint};
use crate::util::units::throughput_mbs;
use crate::Result;
use std::hint::black_box;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Repeating fill byte for the write buffer. Non-zero so the sweep
/// exercises real memory bandwidth instead of zero-page shortcuts.
const FILL_PATTERN: u8 = 0x55;

/// Drives the configured strategy across the size sweep.
pub struct SweepDriver {
    config: SweepConfig,
    strategy: Box<dyn IoStrategy>,
    target_dir: PathBuf,
}

impl SweepDriver {
    /// Create a driver writing its temporary files under `target_dir`.
    /// The configuration must already be validated.
    pub fn new(config: SweepConfig, strategy: Box<dyn IoStrategy>, target_dir: &Path) -> Self {
        Self {
            config,
            strategy,
            target_dir: target_dir.to_path_buf(),
        }
    }

    /// Run the full sweep and collect the result series.
    pub fn run(&self) -> Result<ResultSeries> {
        self.run_with(|_| {})
    }

    /// Run the full sweep, invoking `on_point` once per completed size
    /// point so the caller can report progress.
    ///
    /// A single I/O failure at any size aborts the whole run after
    /// cleanup; a run whose medium is behaving abnormally must not
    /// produce a silently-partial result set.
    pub fn run_with<F>(&self, mut on_point: F) -> Result<ResultSeries>
    where
        F: FnMut(&SizePoint),
    {
        let mut series = ResultSeries::new();

        let mut size_bytes = self.config.min_size;
        while size_bytes <= self.config.max_size {
            let point = self.measure_point(size_bytes)?;
            on_point(&point);
            series.push(point);
            size_bytes += self.config.stride_size;
        }

        Ok(series)
    }

    /// Measure one size point: all write iterations timed as one phase,
    /// then all read-backs timed as one phase, in write order.
    fn measure_point(&self, size_bytes: u64) -> Result<SizePoint> {
        // Dropped on every exit path, removing this point's files.
        let mut files = TempFileSet::new(&self.target_dir);

        let write_buffer = vec![FILL_PATTERN; self.config.buffer_size as usize];

        let write_start = Instant::now();
        for i in 0..self.config.iterations {
            let path = files.register(i);
            self.strategy.write_file(&path, &write_buffer, size_bytes)?;
        }
        let write_elapsed = write_start.elapsed();

        let mut read_buffer = vec![0u8; self.config.buffer_size as usize];

        // XOR the per-file checksums into a sink whose existence alone
        // keeps the reads from being optimized away.
        let mut sink = 0u8;
        let read_start = Instant::now();
        for path in files.paths() {
            sink ^= self.strategy.read_file(path, &mut read_buffer, size_bytes)?;
        }
        let read_elapsed = read_start.elapsed();
        black_box(sink);

        let total_bytes = size_bytes * u64::from(self.config.iterations);
        Ok(SizePoint {
            size_bytes,
            write_speed_mbs: throughput_mbs(total_bytes, write_elapsed),
            read_speed_mbs: throughput_mbs(total_bytes, read_elapsed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyKind;
    use crate::io::{create_strategy, DirectStrategy};
    use crate::{SweepError, TEMP_FILE_PREFIX};
    use std::cell::Cell;
    use tempfile::tempdir;

    fn mib(n: u64) -> u64 {
        n * 1024 * 1024
    }

    fn no_temp_files_left(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().all(|entry| {
            !entry
                .unwrap()
                .file_name()
                .to_string_lossy()
                .starts_with(TEMP_FILE_PREFIX)
        })
    }

    /// Delegates to the direct strategy until a configured write call,
    /// which fails instead.
    struct FailingStrategy {
        inner: DirectStrategy,
        fail_on_write: u32,
        writes: Cell<u32>,
    }

    impl IoStrategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn write_file(&self, path: &Path, buffer: &[u8], size_bytes: u64) -> Result<()> {
            let call = self.writes.get() + 1;
            self.writes.set(call);
            if call == self.fail_on_write {
                return Err(SweepError::io(
                    "injected write",
                    std::io::Error::new(std::io::ErrorKind::Other, "injected failure"),
                ));
            }
            self.inner.write_file(path, buffer, size_bytes)
        }

        fn read_file(&self, path: &Path, buffer: &mut [u8], size_bytes: u64) -> Result<u8> {
            self.inner.read_file(path, buffer, size_bytes)
        }
    }

    #[test]
    fn test_example_scenario_three_points() {
        let dir = tempdir().unwrap();
        let config = SweepConfig::default()
            .with_min_size(mib(1))
            .with_max_size(mib(3))
            .with_stride_size(mib(1))
            .with_buffer_size(mib(1))
            .with_iterations(1)
            .with_strategy(StrategyKind::Direct);
        config.validate().unwrap();

        let driver = SweepDriver::new(
            config.clone(),
            create_strategy(config.strategy),
            dir.path(),
        );
        let series = driver.run().unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.sizes(), vec![mib(1), mib(2), mib(3)]);
        for point in series.iter() {
            assert!(point.write_speed_mbs > 0.0);
            assert!(point.read_speed_mbs > 0.0);
        }
        assert!(no_temp_files_left(dir.path()));
    }

    #[test]
    fn test_all_strategies_produce_series() {
        for kind in [
            StrategyKind::Direct,
            StrategyKind::Buffered,
            StrategyKind::MemoryMapped,
        ] {
            let dir = tempdir().unwrap();
            let config = SweepConfig::default()
                .with_min_size(64 * 1024)
                .with_max_size(192 * 1024)
                .with_stride_size(64 * 1024)
                .with_buffer_size(64 * 1024)
                .with_iterations(2)
                .with_strategy(kind);
            config.validate().unwrap();

            let driver =
                SweepDriver::new(config.clone(), create_strategy(kind), dir.path());
            let series = driver.run().unwrap();

            assert_eq!(series.len(), 3, "strategy {:?}", kind);
            assert!(no_temp_files_left(dir.path()), "strategy {:?}", kind);
        }
    }

    #[test]
    fn test_idempotent_size_sequence() {
        let dir = tempdir().unwrap();
        let config = SweepConfig::default()
            .with_min_size(64 * 1024)
            .with_max_size(256 * 1024)
            .with_stride_size(64 * 1024)
            .with_buffer_size(64 * 1024);
        config.validate().unwrap();

        let driver = SweepDriver::new(
            config.clone(),
            create_strategy(config.strategy),
            dir.path(),
        );
        let first = driver.run().unwrap();
        let second = driver.run().unwrap();

        assert_eq!(first.len(), second.len());
        assert_eq!(first.sizes(), second.sizes());
    }

    #[test]
    fn test_write_failure_aborts_after_cleanup() {
        let dir = tempdir().unwrap();
        let config = SweepConfig::default()
            .with_min_size(64 * 1024)
            .with_max_size(128 * 1024)
            .with_stride_size(64 * 1024)
            .with_buffer_size(64 * 1024)
            .with_iterations(3);
        config.validate().unwrap();

        // First iteration's file is written, the second write fails; the
        // first file must still be cleaned up and no point emitted.
        let strategy = FailingStrategy {
            inner: DirectStrategy,
            fail_on_write: 2,
            writes: Cell::new(0),
        };
        let driver = SweepDriver::new(config, Box::new(strategy), dir.path());

        let mut observed = 0;
        let err = driver.run_with(|_| observed += 1).unwrap_err();
        assert!(matches!(err, SweepError::IoFailure { .. }));
        assert_eq!(observed, 0);
        assert!(no_temp_files_left(dir.path()));
    }

    #[test]
    fn test_observer_sees_every_point() {
        let dir = tempdir().unwrap();
        let config = SweepConfig::default()
            .with_min_size(64 * 1024)
            .with_max_size(192 * 1024)
            .with_stride_size(64 * 1024)
            .with_buffer_size(64 * 1024);
        config.validate().unwrap();

        let driver = SweepDriver::new(
            config.clone(),
            create_strategy(config.strategy),
            dir.path(),
        );
        let mut seen = Vec::new();
        driver.run_with(|p| seen.push(p.size_bytes)).unwrap();
        assert_eq!(seen, vec![64 * 1024, 128 * 1024, 192 * 1024]);
    }
}
