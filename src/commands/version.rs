//! Version command implementation

use crate::error::Result;
use crate::project::{MANIFEST_FILE, SNAPSHOT_FILE, VIRTUALENV_DIR, WORK_DIR};
use crate::project::virtualenv::DEFAULT_VIRTUALENV;

/// Print the version plus the layout this build expects in a project
pub fn run() -> Result<()> {
    for line in version_lines() {
        println!("{line}");
    }
    Ok(())
}

fn version_lines() -> Vec<String> {
    let profile = if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    };

    vec![
        format!("pbundle {}", env!("CARGO_PKG_VERSION")),
        String::new(),
        "Build info:".to_string(),
        format!("  Minimum Rust: {}", env!("CARGO_PKG_RUST_VERSION")),
        format!("  Profile: {profile}"),
        format!("  Target OS: {}", std::env::consts::OS),
        String::new(),
        "Project layout:".to_string(),
        format!("  Manifest: {MANIFEST_FILE}"),
        format!("  Snapshot: {WORK_DIR}/{SNAPSHOT_FILE}"),
        format!("  Virtualenv: {WORK_DIR}/{VIRTUALENV_DIR}"),
        format!("  Default bootstrap tool: {DEFAULT_VIRTUALENV}"),
    ]
}
