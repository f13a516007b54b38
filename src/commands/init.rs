//! Init command implementation
//!
//! Creates an empty requirements.txt in the start directory. Never searches
//! upward and never touches an existing file.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

use super::Context;
use crate::error::{Result, fs::write_failed, project::manifest_exists};
use crate::project::{MANIFEST_FILE, MANIFEST_TEMPLATE};
use crate::ui;

/// Run the init command
pub fn run(ctx: &Context) -> Result<()> {
    create_manifest(&ctx.start_dir)?;
    ui::status(&format!("Created {}", MANIFEST_FILE));
    Ok(())
}

/// Write the manifest template into `dir`, refusing to overwrite
pub fn create_manifest(dir: &Path) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(manifest_exists(MANIFEST_FILE));
        }
        Err(e) => return Err(write_failed(&path, &e)),
    };

    file.write_all(MANIFEST_TEMPLATE.as_bytes())
        .map_err(|e| write_failed(&path, &e))
}
