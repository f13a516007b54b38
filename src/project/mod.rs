//! Project layout for pbundle
//!
//! A project is the nearest directory, walking upward from the start
//! directory, that contains `requirements.txt`. Everything pbundle writes
//! lives in a private directory next to it:
//!
//! ```text
//! requirements.txt          # Declared requirements (user-edited)
//! .pbundle/
//! ├── requirements.last     # Snapshot of the last successful install
//! ├── environment.yaml      # Optional environment overrides for `run`
//! ├── .lock                 # Advisory lock file
//! └── virtualenv/           # The isolated environment
//! ```

pub mod lock;
pub mod virtualenv;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, fs::write_failed, project::manifest_not_found};

pub use lock::ProjectGuard;
pub use virtualenv::VirtualenvTool;

/// Declared requirements filename
pub const MANIFEST_FILE: &str = "requirements.txt";

/// Private working directory name
pub const WORK_DIR: &str = ".pbundle";

/// Snapshot filename inside the working directory
pub const SNAPSHOT_FILE: &str = "requirements.last";

/// Environment override filename inside the working directory
pub const ENV_FILE: &str = "environment.yaml";

/// Lock filename inside the working directory
pub const LOCK_FILE: &str = ".lock";

/// Virtualenv directory name inside the working directory
pub const VIRTUALENV_DIR: &str = "virtualenv";

/// Content written by `pbundle init`
pub const MANIFEST_TEMPLATE: &str = "# pbundle MAGIC\n#pbundle>=0\n\n";

/// Directory holding executables inside a virtualenv
#[cfg(windows)]
pub const VIRTUALENV_BIN: &str = "Scripts";

/// Directory holding executables inside a virtualenv
#[cfg(not(windows))]
pub const VIRTUALENV_BIN: &str = "bin";

/// A located pbundle project
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory containing requirements.txt
    pub root: PathBuf,

    /// Path to the .pbundle directory
    pub work_dir: PathBuf,
}

impl Project {
    /// Use `root` as the project root without searching
    pub fn at(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            work_dir: root.join(WORK_DIR),
        }
    }

    /// Find the nearest directory at or above `start` that has a requirements.txt
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        let mut current = dunce::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

        loop {
            if current.join(MANIFEST_FILE).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Locate the project for `start`, failing with a usage error if there is none
    pub fn locate(start: &Path) -> Result<Self> {
        let root = Self::find_root(start).ok_or_else(|| manifest_not_found(MANIFEST_FILE, start))?;
        tracing::debug!(root = %root.display(), "located project");
        Ok(Self::at(&root))
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.work_dir.join(SNAPSHOT_FILE)
    }

    pub fn env_file_path(&self) -> PathBuf {
        self.work_dir.join(ENV_FILE)
    }

    pub fn virtualenv_path(&self) -> PathBuf {
        self.work_dir.join(VIRTUALENV_DIR)
    }

    /// Directory holding the virtualenv's executables
    pub fn virtualenv_bin(&self) -> PathBuf {
        self.virtualenv_path().join(VIRTUALENV_BIN)
    }

    /// Create the .pbundle directory if missing
    pub fn ensure_work_dir(&self) -> Result<()> {
        if !self.work_dir.is_dir() {
            fs::create_dir_all(&self.work_dir).map_err(|e| write_failed(&self.work_dir, &e))?;
        }
        Ok(())
    }

    /// Create the working directory, take the project lock and bootstrap
    /// the virtualenv on first use
    ///
    /// The returned guard keeps the lock; installs hold it until the snapshot
    /// is written.
    pub fn prepare(&self, tool: &VirtualenvTool) -> Result<ProjectGuard> {
        self.ensure_work_dir()?;
        let guard = self.lock()?;
        if !self.virtualenv_bin().is_dir() {
            tool.create(&self.virtualenv_path())?;
        }
        Ok(guard)
    }

    /// Acquire the advisory lock guarding the virtualenv and the snapshot
    pub fn lock(&self) -> Result<ProjectGuard> {
        ProjectGuard::acquire(&self.work_dir)
    }
}
