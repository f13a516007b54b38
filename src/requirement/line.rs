//! Lexical handling of requirements-file lines

use super::IncludeKind;

/// Options pip accepts after a requirement on the same line
const PER_REQUIREMENT_OPTIONS: &[&str] = &[
    "--hash",
    "--config-settings",
    "--global-option",
    "--install-option",
];

const ARCHIVE_SUFFIXES: &[&str] = &[".whl", ".zip", ".tar.gz", ".tgz", ".tar.bz2", ".tar.xz"];

/// What a non-empty, comment-free line is
#[derive(Debug, PartialEq, Eq)]
pub(super) enum ManifestLine<'a> {
    /// `-r <file>` or `-c <file>`
    Include(IncludeKind, &'a str),
    /// `-e <path or url>`
    Editable(&'a str),
    /// Any other installer option, e.g. `--index-url`
    Option,
    /// Requirement, URL or path, possibly followed by per-requirement options
    Requirement,
}

pub(super) fn classify(line: &str) -> ManifestLine<'_> {
    if !line.starts_with('-') {
        return ManifestLine::Requirement;
    }
    if let Some(target) = option_value(line, "-r", "--requirement") {
        return ManifestLine::Include(IncludeKind::Requirements, target);
    }
    if let Some(target) = option_value(line, "-c", "--constraint") {
        return ManifestLine::Include(IncludeKind::Constraints, target);
    }
    if let Some(target) = option_value(line, "-e", "--editable") {
        return ManifestLine::Editable(target);
    }
    ManifestLine::Option
}

/// Value of `-x value`, `-xvalue`, `--long value` or `--long=value`
fn option_value<'a>(line: &'a str, short: &str, long: &str) -> Option<&'a str> {
    let value = if let Some(rest) = line.strip_prefix(long) {
        if let Some(value) = rest.strip_prefix('=') {
            value
        } else if rest.starts_with(char::is_whitespace) {
            rest
        } else {
            return None;
        }
    } else {
        let rest = line.strip_prefix(short)?;
        if rest.starts_with('-') {
            return None;
        }
        rest
    };

    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Split `six==1.16 --hash=sha256:...` into the requirement and its options
///
/// Only the per-requirement options pip knows are accepted.
pub(super) fn split_options(line: &str) -> Result<(&str, Vec<&str>), String> {
    let Some(start) = option_start(line) else {
        return Ok((line.trim(), Vec::new()));
    };

    let (head, tail) = line.split_at(start);
    let options: Vec<&str> = tail.split_whitespace().collect();
    for token in options.iter().filter(|t| t.starts_with("--")) {
        let flag = token.split_once('=').map_or(*token, |(flag, _)| flag);
        if !PER_REQUIREMENT_OPTIONS.contains(&flag) {
            return Err(format!("unsupported option {flag}"));
        }
    }

    Ok((head.trim(), options))
}

/// Byte offset of the first `--` that follows whitespace
fn option_start(line: &str) -> Option<usize> {
    let mut prev_is_space = false;
    for (idx, ch) in line.char_indices() {
        if ch == '-' && prev_is_space && line[idx..].starts_with("--") {
            return Some(idx);
        }
        prev_is_space = ch.is_whitespace();
    }
    None
}

/// Whether an unparseable requirement is really a URL, archive or local path
pub(super) fn looks_like_source(text: &str) -> bool {
    text == "."
        || text.contains("://")
        || text.starts_with("file:")
        || text.contains('/')
        || text.contains('\\')
        || ARCHIVE_SUFFIXES.iter().any(|suffix| text.ends_with(suffix))
}

/// A wheel or sdist file name, which PEP 508 would misread as a package name
pub(super) fn is_bare_archive(text: &str) -> bool {
    !text.contains('@') && ARCHIVE_SUFFIXES.iter().any(|suffix| text.ends_with(suffix))
}

/// Canonical package name from a `#egg=<name>` URL fragment
pub(super) fn egg_name(target: &str) -> Option<String> {
    let (_, fragment) = target.split_once('#')?;
    let egg = fragment
        .split('&')
        .find_map(|part| part.strip_prefix("egg="))?
        .split_whitespace()
        .next()?;

    let parsed = egg.parse::<pep508_rs::Requirement>().ok()?;
    Some(parsed.name.to_string())
}

/// Collapse runs of whitespace to single spaces
pub(super) fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join backslash continuations, yielding each logical line with its starting line number
pub(super) fn logical_lines(text: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let (start, mut buf) = pending.take().unwrap_or_else(|| (idx + 1, String::new()));
        match raw.strip_suffix('\\') {
            Some(head) => {
                buf.push_str(head);
                pending = Some((start, buf));
            }
            None => {
                buf.push_str(raw);
                lines.push((start, buf));
            }
        }
    }

    if let Some(last) = pending {
        lines.push(last);
    }

    lines
}

/// Cut a line at the first `#` that starts the line or follows whitespace
pub(super) fn strip_comment(line: &str) -> &str {
    let mut prev_is_space = true;
    for (idx, ch) in line.char_indices() {
        if ch == '#' && prev_is_space {
            return &line[..idx];
        }
        prev_is_space = ch.is_whitespace();
    }
    line
}
