//! Error types and handling for pbundle
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostics.
//!
//! Every error falls in one of two classes (see [`FailureKind`]):
//! - usage errors: the user asked for something that cannot be done here
//!   (no `requirements.txt` found, unknown command, `init` would overwrite)
//! - internal errors: anything else, including failing external tools
//!
//! Constructors are grouped by domain:
//! - [`project`]: project layout errors
//! - [`fs`]: file system errors
//! - [`process`]: external process errors

pub mod fs;
pub mod process;
pub mod project;

use miette::Diagnostic;
use thiserror::Error;

/// Exit code for usage errors
pub const EXIT_USAGE: u8 = 1;

/// Exit code for unexpected internal errors
pub const EXIT_INTERNAL: u8 = 120;

/// Main error type for pbundle operations
#[derive(Error, Diagnostic, Debug)]
pub enum PbundleError {
    // Usage errors
    #[error("Could not find {manifest} in path from here to root.")]
    #[diagnostic(
        code(pbundle::project::manifest_not_found),
        help("Run 'pbundle init' to create an empty requirements file")
    )]
    ManifestNotFound { manifest: String, start: String },

    #[error("Cowardly refusing, as {path} already exists here.")]
    #[diagnostic(code(pbundle::project::manifest_exists))]
    ManifestExists { path: String },

    #[error("Unknown command \"{command}\"")]
    #[diagnostic(
        code(pbundle::cli::unknown_command),
        help("Run 'pbundle help' to list the available commands")
    )]
    UnknownCommand { command: String },

    #[error("No program given to run")]
    #[diagnostic(code(pbundle::cli::empty_command))]
    EmptyCommand,

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(pbundle::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(pbundle::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(pbundle::fs::io_error))]
    IoError { message: String },

    // Project errors
    #[error("Failed to lock project: {reason}")]
    #[diagnostic(code(pbundle::project::lock_failed))]
    ProjectLockFailed { reason: String },

    #[error("Project is locked by another pbundle process")]
    #[diagnostic(
        code(pbundle::project::locked),
        help("Wait for the other process to finish and try again")
    )]
    ProjectLocked,

    #[error("Failed to create virtualenv at {path}: {reason}")]
    #[diagnostic(
        code(pbundle::project::virtualenv_failed),
        help("Check that virtualenv is installed, or point --virtualenv at another tool")
    )]
    VirtualenvFailed { path: String, reason: String },

    // External process errors
    #[error("Failed to start \"{command}\": {reason}")]
    #[diagnostic(code(pbundle::process::spawn_failed))]
    SpawnFailed { command: String, reason: String },

    #[error("\"{command}\" failed: {status}")]
    #[diagnostic(code(pbundle::process::command_failed))]
    CommandFailed { command: String, status: String },

    #[error("Failed to execute \"{program}\": {reason}")]
    #[diagnostic(code(pbundle::process::launch_failed))]
    LaunchFailed { program: String, reason: String },
}

/// How an error is surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Printed with an `E:` prefix, exit code 1
    Usage,
    /// Printed as an internal error, exit code 120
    Internal,
}

impl PbundleError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PbundleError::ManifestNotFound { .. }
            | PbundleError::ManifestExists { .. }
            | PbundleError::UnknownCommand { .. }
            | PbundleError::EmptyCommand => FailureKind::Usage,
            PbundleError::FileReadFailed { .. }
            | PbundleError::FileWriteFailed { .. }
            | PbundleError::IoError { .. }
            | PbundleError::ProjectLockFailed { .. }
            | PbundleError::ProjectLocked
            | PbundleError::VirtualenvFailed { .. }
            | PbundleError::SpawnFailed { .. }
            | PbundleError::CommandFailed { .. }
            | PbundleError::LaunchFailed { .. } => FailureKind::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self.kind() {
            FailureKind::Usage => EXIT_USAGE,
            FailureKind::Internal => EXIT_INTERNAL,
        }
    }
}

impl From<std::io::Error> for PbundleError {
    fn from(err: std::io::Error) -> Self {
        PbundleError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PbundleError>;
