//! Project layout errors

use std::path::Path;

use super::PbundleError;

/// Creates a manifest not found error for an upward search starting at `start`
pub fn manifest_not_found(manifest: &str, start: &Path) -> PbundleError {
    PbundleError::ManifestNotFound {
        manifest: manifest.to_string(),
        start: start.display().to_string(),
    }
}

/// Creates an error for `init` refusing to overwrite an existing manifest
pub fn manifest_exists(path: impl Into<String>) -> PbundleError {
    PbundleError::ManifestExists { path: path.into() }
}

/// Creates a virtualenv bootstrap error
pub fn virtualenv_failed(path: &Path, reason: impl Into<String>) -> PbundleError {
    PbundleError::VirtualenvFailed {
        path: path.display().to_string(),
        reason: reason.into(),
    }
}
