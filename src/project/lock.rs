//! Advisory project lock
//!
//! Serializes concurrent pbundle processes working on the same project for
//! the read-reconcile-persist sequence.

use std::path::Path;

use fslock::LockFile;

use super::LOCK_FILE;
use crate::error::{PbundleError, Result};
use crate::ui;

/// RAII guard for the project lock
///
/// Acquires an advisory file lock on creation and releases it on drop.
#[derive(Debug)]
pub struct ProjectGuard {
    lock: LockFile,
}

impl ProjectGuard {
    /// Acquire the lock, blocking until any other holder releases it
    pub fn acquire(work_dir: &Path) -> Result<Self> {
        let lock_path = work_dir.join(LOCK_FILE);
        let mut lock = LockFile::open(&lock_path).map_err(|e| PbundleError::ProjectLockFailed {
            reason: format!("Failed to open lock file {}: {}", lock_path.display(), e),
        })?;

        let acquired = lock
            .try_lock()
            .map_err(|e| PbundleError::ProjectLockFailed {
                reason: format!("Failed to try lock: {}", e),
            })?;
        if !acquired {
            ui::status("Waiting for another pbundle process to finish with this project ...");
            tracing::debug!(path = %lock_path.display(), "waiting for project lock");
            lock.lock().map_err(|_| PbundleError::ProjectLocked)?;
        }

        Ok(Self { lock })
    }
}

impl Drop for ProjectGuard {
    fn drop(&mut self) {
        let _ = self.lock.unlock();
    }
}
