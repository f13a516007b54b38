//! File system errors

use std::path::Path;

use super::PbundleError;

/// Creates a file read failed error
pub fn read_failed(path: &Path, err: &std::io::Error) -> PbundleError {
    PbundleError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, err: &std::io::Error) -> PbundleError {
    PbundleError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
