//! Scoped deletion of one size point's temporary files
//!
//! Every filename recorded for the current size point is deleted exactly
//! once on every exit path, normal completion or abort after failure.
//! Deletion is best-effort: failures are ignored and a missing file is
//! not an error.

use crate::temp_file_name;
use std::fs;
use std::path::{Path, PathBuf};

/// Temporary-file set for one size point, removed on drop.
pub struct TempFileSet {
    dir: PathBuf,
    files: Vec<PathBuf>,
}

impl TempFileSet {
    /// Create an empty set rooted at the sweep's target directory
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            files: Vec::new(),
        }
    }

    /// Build and record the path for one write iteration. Recorded before
    /// the write is attempted, so a file half-created by a failed write is
    /// still swept.
    pub fn register(&mut self, index: u32) -> PathBuf {
        let path = self.dir.join(temp_file_name(index));
        self.files.push(path.clone());
        path
    }

    /// Recorded paths in write order
    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }
}

impl Drop for TempFileSet {
    fn drop(&mut self) {
        for path in &self.files {
            let _ = fs::remove_file(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_files_removed_on_drop() {
        let dir = tempdir().unwrap();
        let first;
        let second;
        {
            let mut set = TempFileSet::new(dir.path());
            first = set.register(0);
            second = set.register(1);
            std::fs::write(&first, b"data").unwrap();
            std::fs::write(&second, b"data").unwrap();
            assert!(first.exists());
            assert!(second.exists());
        }
        assert!(!first.exists());
        assert!(!second.exists());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let mut set = TempFileSet::new(dir.path());
        // Registered but never created on disk.
        set.register(0);
        drop(set);
    }

    #[test]
    fn test_paths_follow_naming_pattern() {
        let dir = tempdir().unwrap();
        let mut set = TempFileSet::new(dir.path());
        let path = set.register(7);
        assert!(path.ends_with("testfile_7.bin"));
        assert_eq!(set.paths().len(), 1);
    }
}
