//! Results persistence module
//!
//! Handles saving, loading, and rotation of completed sweep runs.

use crate::models::RunRecord;
use crate::{Result, SweepError, APP_NAME, MAX_RESULTS_HISTORY, RESULTS_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Results storage manager
#[derive(Debug)]
pub struct ResultsStorage {
    results_path: PathBuf,
}

/// Results file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct ResultsFile {
    version: u32,
    runs: Vec<RunRecord>,
}

impl Default for ResultsFile {
    fn default() -> Self {
        Self {
            version: 1,
            runs: Vec::new(),
        }
    }
}

impl ResultsStorage {
    /// Create a results storage manager at the standard location
    pub fn new() -> Result<Self> {
        let results_path = Self::results_file_path()?;
        Ok(Self { results_path })
    }

    /// Create a results storage manager backed by an explicit file path
    pub fn with_path(results_path: PathBuf) -> Self {
        Self { results_path }
    }

    /// Get the standard results file path
    /// Uses $DATA_HOME/disksweep/results.json
    pub fn results_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            SweepError::PersistenceError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(RESULTS_FILE))
    }

    /// Path this storage writes to
    pub fn path(&self) -> &PathBuf {
        &self.results_path
    }

    /// Load all recorded runs from the results file
    pub fn load_runs(&self) -> Result<Vec<RunRecord>> {
        if !self.results_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.results_path).map_err(|e| {
            SweepError::PersistenceError(format!(
                "Failed to read results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        let results_file: ResultsFile = serde_json::from_str(&content).map_err(|e| {
            SweepError::PersistenceError(format!(
                "Failed to parse results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        Ok(results_file.runs)
    }

    /// Append a new run to the results file, rotating out the oldest
    /// entries beyond MAX_RESULTS_HISTORY.
    pub fn append_run(&self, run: RunRecord) -> Result<()> {
        let mut runs = self.load_runs()?;

        runs.push(run);

        if runs.len() > MAX_RESULTS_HISTORY {
            let skip_count = runs.len() - MAX_RESULTS_HISTORY;
            runs = runs.into_iter().skip(skip_count).collect();
        }

        self.save_runs(runs)
    }

    /// Save all runs to the results file
    fn save_runs(&self, runs: Vec<RunRecord>) -> Result<()> {
        if let Some(parent) = self.results_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SweepError::PersistenceError(format!(
                    "Failed to create results directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let results_file = ResultsFile { version: 1, runs };
        let content = serde_json::to_string_pretty(&results_file)?;

        fs::write(&self.results_path, content).map_err(|e| {
            SweepError::PersistenceError(format!(
                "Failed to write results file {}: {}",
                self.results_path.display(),
                e
            ))
        })?;

        Ok(())
    }
}
