//! Staged multi-file edits committed as a batch
//!
//! Tree-wide rewrites first compute every new file body in memory. Nothing
//! touches disk until the whole set is staged, so a read failure leaves the
//! tree as it was. If a write fails during commit, the files already written
//! in the batch are restored from their staged originals.

use super::file::write_atomic;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct StagedEdit {
    path: PathBuf,
    original: String,
    updated: String,
}

#[derive(Debug, Default)]
pub struct EditSet {
    edits: Vec<StagedEdit>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a new body for `path`; unchanged bodies are dropped
    pub fn stage(&mut self, path: impl Into<PathBuf>, original: String, updated: String) {
        if original == updated {
            return;
        }
        self.edits.push(StagedEdit {
            path: path.into(),
            original,
            updated,
        });
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.edits.iter().map(|e| e.path.as_path())
    }

    /// Write every staged edit; on failure, roll back the ones already written
    pub fn commit(self) -> Result<usize> {
        for (idx, edit) in self.edits.iter().enumerate() {
            if let Err(err) = write_atomic(&edit.path, edit.updated.as_bytes()) {
                for done in self.edits[..idx].iter().rev() {
                    if let Err(restore_err) = write_atomic(&done.path, done.original.as_bytes()) {
                        warn!(
                            path = %done.path.display(),
                            error = %restore_err,
                            "failed to restore file during rollback"
                        );
                    }
                }
                return Err(err);
            }
            debug!(path = %edit.path.display(), "committed staged edit");
        }
        Ok(self.edits.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_unchanged_bodies_not_staged() {
        let mut set = EditSet::new();
        set.stage("a.go", "same".to_string(), "same".to_string());
        assert!(set.is_empty());
    }

    #[test]
    fn test_commit_writes_all() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.go");
        let b = dir.path().join("b.go");
        fs::write(&a, "old a").unwrap();
        fs::write(&b, "old b").unwrap();

        let mut set = EditSet::new();
        set.stage(&a, "old a".to_string(), "new a".to_string());
        set.stage(&b, "old b".to_string(), "new b".to_string());
        assert_eq!(set.len(), 2);

        assert_eq!(set.commit().unwrap(), 2);
        assert_eq!(fs::read_to_string(&a).unwrap(), "new a");
        assert_eq!(fs::read_to_string(&b).unwrap(), "new b");
    }

    #[test]
    fn test_failed_commit_rolls_back() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.go");
        fs::write(&a, "old a").unwrap();
        let unwritable = dir.path().join("gone").join("b.go");

        let mut set = EditSet::new();
        set.stage(&a, "old a".to_string(), "new a".to_string());
        set.stage(&unwritable, "old b".to_string(), "new b".to_string());

        assert!(set.commit().is_err());
        assert_eq!(fs::read_to_string(&a).unwrap(), "old a");
    }
}
