//! Sweep result data models
//!
//! Contains structures for storing and serializing the throughput samples
//! produced by the size sweep.

use crate::config::SweepConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sweep iteration's outcome: a tested file size plus its measured
/// write and read throughput. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizePoint {
    /// Tested file size in bytes
    pub size_bytes: u64,
    /// Measured write throughput in MB/s
    pub write_speed_mbs: f64,
    /// Measured read throughput in MB/s
    pub read_speed_mbs: f64,
}

/// Ordered collection of size points produced by the sweep, appended in
/// increasing-size order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSeries {
    points: Vec<SizePoint>,
}

impl ResultSeries {
    /// Create an empty result series
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one size point. Points arrive in increasing-size order.
    pub fn push(&mut self, point: SizePoint) {
        self.points.push(point);
    }

    /// Number of collected size points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series holds no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate the collected size points in sweep order
    pub fn iter(&self) -> impl Iterator<Item = &SizePoint> {
        self.points.iter()
    }

    /// All collected size points in sweep order
    pub fn points(&self) -> &[SizePoint] {
        &self.points
    }

    /// The tested sizes in sweep order
    pub fn sizes(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.size_bytes).collect()
    }

    /// The largest speed in either curve, for chart scaling
    pub fn peak_speed(&self) -> f64 {
        self.points
            .iter()
            .flat_map(|p| [p.write_speed_mbs, p.read_speed_mbs])
            .fold(0.0, f64::max)
    }
}

/// A completed run: the configuration that produced it, the resulting
/// series, and when it ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Timestamp when the sweep was executed
    pub timestamp: DateTime<Utc>,
    /// Configuration used for this run
    pub config: SweepConfig,
    /// Throughput samples collected by the sweep
    pub series: ResultSeries,
}

impl RunRecord {
    /// Create a run record stamped with the current time
    pub fn new(config: SweepConfig, series: ResultSeries) -> Self {
        Self {
            timestamp: Utc::now(),
            config,
            series,
        }
    }

    /// Get a human-readable one-line summary of the run
    pub fn summary(&self) -> String {
        format!(
            "{} - {} - {} size points",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.config.strategy.description(),
            self.series.len()
        )
    }
}
