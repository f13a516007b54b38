//! Requirement normalization
//!
//! Turns the text of a requirements file into a [`RequirementSet`]: one
//! canonical [`Requirement`] per package name, plus entries for the lines pip
//! installs without a PEP 508 name. The specifier grammar itself belongs to
//! PEP 508 and is handled by `pep508_rs`; this module only decides what each
//! line is and how it is tracked.
//!
//! Line handling:
//! - a trailing `\` joins the line with the next one
//! - `#` at the start of a line, or after whitespace, starts a comment
//! - blank lines and comment-only lines are ignored
//! - `-r <file>` and `-c <file>` are collected in [`ParsedManifest::includes`];
//!   [`crate::manifest::load`] follows them
//! - `-e <target>`, URLs and paths are tracked by their `#egg=` name, or by
//!   the whole line when they have none
//! - per-requirement options (`--hash`, `--config-settings`, ...) are kept
//!   as part of the tracked line
//! - other installer options (`--index-url`) are left to the installer
//! - lines the parser rejects are reported in [`ParsedManifest::skipped`]
//!
//! When a name appears more than once the last occurrence wins.

mod line;

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;
use std::path::{Path, PathBuf};

use line::{
    ManifestLine, classify, egg_name, is_bare_archive, logical_lines, looks_like_source,
    normalize_space, split_options, strip_comment,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequirementKind {
    /// PEP 508 requirement
    Package,
    /// Editable install, URL, local path or an include pip fetches itself
    Source,
    /// Pin from a constraints file; installs nothing by itself
    Constraint,
}

/// A single normalized requirement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    pub kind: RequirementKind,

    /// Canonical package name (PEP 503 normalized), when the line names one
    pub name: Option<String>,

    /// Normalized line, e.g. `requests[socks]>=2.0` or `-e ./lib#egg=mylib`
    pub specifier: String,
}

impl Requirement {
    /// Parse a requirement, URL or path with any trailing per-requirement options
    pub fn parse(line: &str) -> std::result::Result<Self, String> {
        let (head, options) = split_options(line)?;

        let (kind, name, mut specifier) = if is_bare_archive(head) {
            (RequirementKind::Source, egg_name(head), head.to_string())
        } else {
            match head.parse::<pep508_rs::Requirement>() {
                Ok(parsed) => (
                    RequirementKind::Package,
                    Some(parsed.name.to_string()),
                    parsed.to_string(),
                ),
                Err(_) if looks_like_source(head) => {
                    (RequirementKind::Source, egg_name(head), head.to_string())
                }
                Err(e) => return Err(e.to_string()),
            }
        };

        for option in options {
            specifier.push(' ');
            specifier.push_str(option);
        }

        Ok(Self {
            kind,
            name,
            specifier,
        })
    }

    /// An editable install, named by its `#egg=` fragment when present
    pub fn editable(target: &str) -> Self {
        let target = normalize_space(target);
        Self {
            kind: RequirementKind::Source,
            name: egg_name(&target),
            specifier: format!("-e {target}"),
        }
    }

    /// A line tracked exactly as written
    pub fn verbatim(line: &str) -> Self {
        Self {
            kind: RequirementKind::Source,
            name: None,
            specifier: normalize_space(line),
        }
    }

    /// Reinterpret a requirement read from a constraints file
    pub fn into_constraint(self) -> Self {
        match self.kind {
            RequirementKind::Package => Self {
                kind: RequirementKind::Constraint,
                ..self
            },
            RequirementKind::Source | RequirementKind::Constraint => self,
        }
    }

    /// Package name pip installs for this entry
    pub fn package(&self) -> Option<&str> {
        match self.kind {
            RequirementKind::Constraint => None,
            RequirementKind::Package | RequirementKind::Source => self.name.as_deref(),
        }
    }

    /// Identity in a [`RequirementSet`]
    pub fn key(&self) -> String {
        match (self.kind, &self.name) {
            (RequirementKind::Constraint, Some(name)) => format!("-c {name}"),
            (_, Some(name)) => name.clone(),
            (_, None) => self.specifier.clone(),
        }
    }
}

/// Renders the snapshot form of the entry
impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RequirementKind::Constraint => write!(f, "-c {}", self.specifier),
            RequirementKind::Package | RequirementKind::Source => f.write_str(&self.specifier),
        }
    }
}

/// Requirements keyed by package name, or by line for unnamed sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequirementSet {
    entries: BTreeMap<String, Requirement>,
}

impl RequirementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a requirement, replacing any earlier one with the same key
    pub fn insert(&mut self, requirement: Requirement) -> Option<Requirement> {
        self.entries.insert(requirement.key(), requirement)
    }

    pub fn get(&self, key: &str) -> Option<&Requirement> {
        self.entries.get(key)
    }

    /// Whether an entry installs the package `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|requirement| requirement.package() == Some(name))
    }

    /// Names of the packages the entries install
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.values().filter_map(Requirement::package)
    }

    /// Entries in key order
    pub fn iter(&self) -> btree_map::Values<'_, String, Requirement> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Requirement> for RequirementSet {
    fn from_iter<T: IntoIterator<Item = Requirement>>(iter: T) -> Self {
        let mut set = Self::new();
        for requirement in iter {
            set.insert(requirement);
        }
        set
    }
}

impl IntoIterator for RequirementSet {
    type Item = Requirement;
    type IntoIter = btree_map::IntoValues<String, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_values()
    }
}

impl<'a> IntoIterator for &'a RequirementSet {
    type Item = &'a Requirement;
    type IntoIter = btree_map::Values<'a, String, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncludeKind {
    /// `-r <file>`
    Requirements,
    /// `-c <file>`
    Constraints,
}

/// An include line, not yet followed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Include {
    pub line: usize,
    pub kind: IncludeKind,
    /// Path or URL as written
    pub target: String,
    /// The whole line, e.g. `-r base.txt`
    pub text: String,
}

/// A manifest line the requirement parser rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// File the line came from, when known
    pub file: Option<PathBuf>,
    /// 1-based line number where the (possibly continued) line starts
    pub line: usize,
    pub text: String,
    pub reason: String,
}

impl SkippedLine {
    pub fn in_file(self, file: &Path) -> Self {
        Self {
            file: Some(file.to_path_buf()),
            ..self
        }
    }
}

impl fmt::Display for SkippedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}: ", file.display())?;
        }
        write!(
            f,
            "line {}: ignoring \"{}\": {}",
            self.line, self.text, self.reason
        )
    }
}

/// Result of normalizing a requirements file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedManifest {
    pub requirements: RequirementSet,
    pub includes: Vec<Include>,
    pub skipped: Vec<SkippedLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Manifest,
    Snapshot,
}

/// Normalize the text of a user-written requirements file
pub fn parse_requirements(text: &str) -> ParsedManifest {
    parse_lines(text, Origin::Manifest)
}

/// Normalize the text of a snapshot
///
/// Snapshots are flat: `-c <requirement>` is an inline constraint and
/// `-r <url>` a tracked line, never a file to follow.
pub fn parse_snapshot(text: &str) -> ParsedManifest {
    parse_lines(text, Origin::Snapshot)
}

fn parse_lines(text: &str, origin: Origin) -> ParsedManifest {
    let mut parsed = ParsedManifest::default();

    for (line_no, line) in logical_lines(text) {
        let line = strip_comment(&line).trim();
        if line.is_empty() {
            continue;
        }

        let entry = match classify(line) {
            ManifestLine::Include(kind, target) => match origin {
                Origin::Manifest => {
                    parsed.includes.push(Include {
                        line: line_no,
                        kind,
                        target: target.to_string(),
                        text: line.to_string(),
                    });
                    continue;
                }
                Origin::Snapshot => Ok(flattened_include(kind, target, line)),
            },
            ManifestLine::Editable(target) => Ok(Requirement::editable(target)),
            ManifestLine::Option => {
                tracing::debug!(line = line_no, option = line, "leaving installer option to pip");
                continue;
            }
            ManifestLine::Requirement => Requirement::parse(line),
        };

        match entry {
            Ok(requirement) => {
                if let Some(previous) = parsed.requirements.insert(requirement) {
                    tracing::debug!(
                        line = line_no,
                        replaced = %previous,
                        "duplicate requirement, keeping the later one"
                    );
                }
            }
            Err(reason) => parsed.skipped.push(SkippedLine {
                file: None,
                line: line_no,
                text: line.to_string(),
                reason,
            }),
        }
    }

    parsed
}

/// Read back an include line as written by the snapshot
fn flattened_include(kind: IncludeKind, target: &str, line: &str) -> Requirement {
    match (kind, Requirement::parse(target)) {
        (IncludeKind::Constraints, Ok(requirement))
            if requirement.kind == RequirementKind::Package =>
        {
            requirement.into_constraint()
        }
        _ => Requirement::verbatim(line),
    }
}

#[cfg(test)]
mod tests;
