//! External process errors

use std::process::ExitStatus;

use super::PbundleError;

/// Creates an error for a child process that could not be started
pub fn spawn_failed(command: impl Into<String>, err: &std::io::Error) -> PbundleError {
    PbundleError::SpawnFailed {
        command: command.into(),
        reason: err.to_string(),
    }
}

/// Creates an error for a child process that exited unsuccessfully
pub fn command_failed(command: impl Into<String>, status: ExitStatus) -> PbundleError {
    PbundleError::CommandFailed {
        command: command.into(),
        status: status.to_string(),
    }
}
