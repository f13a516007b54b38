//! Command implementations for the pbundle CLI

pub mod completions;
pub mod init;
pub mod install;
pub mod run;
pub mod version;

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{PbundleError, Result};
use crate::project::{Project, ProjectGuard, VirtualenvTool};

/// Settings shared by every command, resolved from global CLI options
#[derive(Debug, Clone)]
pub struct Context {
    /// Where the upward search for requirements.txt starts
    pub start_dir: PathBuf,

    /// Tool used to bootstrap the virtualenv
    pub virtualenv: VirtualenvTool,

    pub verbose: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self {
            start_dir: resolve_start_dir(cli.directory.clone())?,
            virtualenv: VirtualenvTool::parse(&cli.virtualenv),
            verbose: cli.verbose,
        })
    }

    /// Locate the project and make sure its virtualenv exists
    ///
    /// The virtualenv is bootstrapped under the project lock, which the
    /// returned guard still holds.
    pub fn open_project(&self) -> Result<(Project, ProjectGuard)> {
        let project = Project::locate(&self.start_dir)?;
        let guard = project.prepare(&self.virtualenv)?;
        Ok((project, guard))
    }
}

/// Resolve the start directory from an optional argument, defaulting to the current directory
fn resolve_start_dir(directory: Option<PathBuf>) -> Result<PathBuf> {
    match directory {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| PbundleError::IoError {
            message: format!("Failed to get current directory: {}", e),
        }),
    }
}
