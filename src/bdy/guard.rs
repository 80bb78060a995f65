//! RAII guard for downloaded archive cleanup.
//!
//! Ensures the archive is removed on every exit path, including a failed
//! download or extraction.

use std::path::{Path, PathBuf};

/// Removes the archive at `path` when dropped.
#[derive(Debug)]
pub struct ArchiveGuard {
    path: PathBuf,
    armed: bool,
}

impl ArchiveGuard {
    /// Guard the archive that will be written to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            armed: true,
        }
    }

    /// Archive location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the archive now and report the result.
    ///
    /// A missing file is not an error.
    pub fn finish(mut self) -> std::io::Result<()> {
        self.armed = false;
        remove_if_present(&self.path)
    }
}

impl Drop for ArchiveGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        // Drop must never panic; failures are only logged
        if let Err(e) = remove_if_present(&self.path) {
            log::warn!("Failed to remove {}: {}", self.path.display(), e);
        }
    }
}

fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
