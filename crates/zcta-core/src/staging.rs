//! Staging directory and atomic placement.
//!
//! Extraction happens in a hidden `.part` directory beside the target; the
//! finished tree is renamed onto the target path in one step. The target
//! therefore never exists in a half-extracted state, and a failed run leaves
//! nothing behind that a later run would mistake for a completed fetch.

use crate::error::FetchError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Suffix used in staging directory names (`.<target>.part<random>`).
pub const STAGING_SUFFIX: &str = ".part";

/// Result of moving a staged tree into place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The staged tree is now at the target path.
    Placed,
    /// Another run created the target first; the staged tree was discarded.
    LostRace,
}

/// A temporary directory on the same filesystem as its target.
/// Removed on drop unless [`StagingDir::commit`] moved it into place.
#[derive(Debug)]
pub struct StagingDir {
    dir: TempDir,
    target: PathBuf,
}

impl StagingDir {
    /// Creates the staging directory in `target`'s parent, creating the parent
    /// chain first if needed.
    pub fn create(target: &Path) -> Result<Self, FetchError> {
        let parent = parent_of(target);
        fs::create_dir_all(&parent).map_err(|e| FetchError::fs(&parent, e))?;

        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "download".to_string());
        let dir = tempfile::Builder::new()
            .prefix(&format!(".{}{}", name, STAGING_SUFFIX))
            .tempdir_in(&parent)
            .map_err(|e| FetchError::fs(&parent, e))?;
        tracing::debug!("staging {} in {}", target.display(), dir.path().display());

        Ok(StagingDir {
            dir,
            target: target.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Renames the staged tree onto the target path.
    ///
    /// If the rename fails and the target now exists, a concurrent run got
    /// there first: the staged copy is dropped and `LostRace` is returned.
    pub fn commit(self) -> Result<CommitOutcome, FetchError> {
        match fs::rename(self.dir.path(), &self.target) {
            Ok(()) => {
                // Disarm the guard: its path now belongs to the target.
                let _ = self.dir.keep();
                Ok(CommitOutcome::Placed)
            }
            Err(e) if self.target.exists() => {
                tracing::warn!(
                    "{} appeared while extracting ({}); keeping existing copy",
                    self.target.display(),
                    e
                );
                Ok(CommitOutcome::LostRace)
            }
            Err(e) => Err(FetchError::fs(&self.target, e)),
        }
    }
}

/// Parent directory of `target`; `.` for bare relative names.
fn parent_of(target: &Path) -> PathBuf {
    match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
