//! Test fixtures shared by the unit tests
//!
//! ```ignore
//! use crate::test_fixtures::{create_project, create_temp_dir};
//!
//! #[test]
//! fn my_test() {
//!     let temp = create_temp_dir();
//!     let (temp, root) = create_project("six\n");
//! }
//! ```

#![allow(clippy::expect_used)]

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

use crate::project::MANIFEST_FILE;

/// Absolute base for temp dirs, so they never land under the working
/// directory when TMPDIR is relative
fn temp_dir_base() -> PathBuf {
    let t = env::temp_dir();
    if t.is_absolute() {
        t
    } else if cfg!(windows) {
        env::var("TEMP")
            .or_else(|_| env::var("TMP"))
            .map_or_else(|_| PathBuf::from("C:\\Windows\\Temp"), PathBuf::from)
    } else {
        PathBuf::from("/tmp")
    }
}

/// Create an empty temp directory
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(temp_dir_base()).expect("Failed to create temp directory")
}

/// Create a temp project whose requirements.txt holds `manifest`
///
/// Returns the `TempDir` (which cleans up on drop) and the canonical project root,
/// the same form `Project::find_root` returns.
///
/// # Panics
///
/// Panics if the directory or manifest cannot be created.
#[must_use]
pub fn create_project(manifest: &str) -> (TempDir, PathBuf) {
    let temp = create_temp_dir();
    std::fs::write(temp.path().join(MANIFEST_FILE), manifest).expect("Failed to write manifest");
    let root = dunce::canonicalize(temp.path()).expect("Failed to canonicalize temp directory");
    (temp, root)
}

/// Create nested directories below `temp`
///
/// # Panics
///
/// Panics if the directories cannot be created.
#[must_use]
pub fn create_nested_dir(temp: &TempDir, path: &str) -> PathBuf {
    let nested = temp.path().join(path);
    std::fs::create_dir_all(&nested).expect("Failed to create nested directories");
    nested
}
