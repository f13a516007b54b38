//! Reading requirements files and writing the install snapshot
//!
//! The declared manifest is a requirements file that may include others with
//! `-r` and `-c`; [`load`] follows those relative to the including file. The
//! snapshot is the flattened result, written back as one normalized line per
//! entry under a generated comment header. A missing file reads as empty.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{
    Result,
    fs::{read_failed, write_failed},
};
use crate::project::SNAPSHOT_FILE;
use crate::requirement::{
    IncludeKind, ParsedManifest, Requirement, RequirementSet, SkippedLine, parse_requirements,
    parse_snapshot,
};

/// Read a file, treating absence as empty text
pub fn read_optional(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "file absent, reading as empty");
            Ok(String::new())
        }
        Err(e) => Err(read_failed(path, &e)),
    }
}

/// Read and normalize a requirements file together with everything it includes
pub fn load(path: &Path) -> Result<ParsedManifest> {
    let mut loaded = ParsedManifest::default();
    let mut visited = BTreeSet::new();
    load_into(path, false, &mut visited, &mut loaded)?;
    Ok(loaded)
}

fn load_into(
    path: &Path,
    constraints: bool,
    visited: &mut BTreeSet<PathBuf>,
    loaded: &mut ParsedManifest,
) -> Result<()> {
    let canonical = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical) {
        tracing::debug!(path = %path.display(), "already included, skipping");
        return Ok(());
    }

    let parsed = parse_requirements(&read_optional(path)?);
    for requirement in parsed.requirements {
        let requirement = if constraints {
            requirement.into_constraint()
        } else {
            requirement
        };
        loaded.requirements.insert(requirement);
    }
    loaded
        .skipped
        .extend(parsed.skipped.into_iter().map(|skipped| skipped.in_file(path)));

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    for include in parsed.includes {
        if include.target.contains("://") {
            tracing::debug!(include = %include.target, "remote include left to pip");
            loaded.requirements.insert(Requirement::verbatim(&include.text));
            continue;
        }

        let target = base.join(&include.target);
        if !target.is_file() {
            loaded.skipped.push(SkippedLine {
                file: Some(path.to_path_buf()),
                line: include.line,
                reason: format!("{} does not exist", target.display()),
                text: include.text,
            });
            continue;
        }

        let nested = constraints || include.kind == IncludeKind::Constraints;
        load_into(&target, nested, visited, loaded)?;
    }

    Ok(())
}

/// Read the snapshot written by the last successful install
pub fn load_snapshot(path: &Path) -> Result<ParsedManifest> {
    Ok(parse_snapshot(&read_optional(path)?))
}

/// Render the snapshot file content for `requirements`
pub fn render_snapshot(requirements: &RequirementSet, written_at: SystemTime) -> String {
    let seconds = written_at
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default();

    let mut content = format!("#pbundle {}, written {:.3}\n", SNAPSHOT_FILE, seconds);
    for requirement in requirements {
        content.push_str(&requirement.to_string());
        content.push('\n');
    }
    content
}

/// Replace the snapshot at `path` with `requirements`, stamped with the current time
///
/// Written next to the target and renamed into place, so an interrupted
/// write never leaves a truncated snapshot behind.
pub fn write_snapshot(path: &Path, requirements: &RequirementSet) -> Result<()> {
    let content = render_snapshot(requirements, SystemTime::now());
    let tmp_path = path.with_file_name(format!("{}.tmp", SNAPSHOT_FILE));

    fs::write(&tmp_path, content).map_err(|e| write_failed(&tmp_path, &e))?;
    fs::rename(&tmp_path, path).map_err(|e| write_failed(path, &e))?;

    tracing::debug!(path = %path.display(), entries = requirements.len(), "snapshot written");
    Ok(())
}
