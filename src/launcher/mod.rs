//! Running programs inside the project's virtualenv
//!
//! The environment a child sees is described by a [`LaunchEnv`] value and
//! applied to the [`Command`] being built; the parent's own environment is
//! never mutated. On Unix the launched program replaces the pbundle process,
//! elsewhere it is spawned and its exit code forwarded.

pub mod envfile;

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, ExitCode};

use crate::error::{PbundleError, Result};
use crate::project::Project;
use crate::ui;

pub use envfile::EnvOverrides;

/// Variable naming the active virtualenv
pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";

/// Executable search path
pub const PATH: &str = "PATH";

/// Interpreter home; a stale value would point python outside the virtualenv
pub const PYTHONHOME: &str = "PYTHONHOME";

/// Environment changes applied to a child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchEnv {
    set: BTreeMap<OsString, OsString>,
    remove: BTreeSet<OsString>,
}

impl LaunchEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate the virtualenv at `root` whose executables live in `bin`
    ///
    /// `inherited_path` is the `PATH` the child would otherwise see.
    pub fn for_virtualenv(root: &Path, bin: &Path, inherited_path: Option<&OsStr>) -> Self {
        let mut env = Self::new();
        env.remove(PYTHONHOME);
        env.set(VIRTUAL_ENV, root.as_os_str());
        env.set(PATH, prepend_path(bin, inherited_path));
        env
    }

    /// Activation for `project`, using the current process' `PATH` and
    /// applying the project's environment overrides
    pub fn for_project(project: &Project) -> Self {
        let inherited = std::env::var_os(PATH);
        let mut env = Self::for_virtualenv(
            &project.virtualenv_path(),
            &project.virtualenv_bin(),
            inherited.as_deref(),
        );
        env.apply_overrides(&envfile::load(&project.env_file_path()));
        env
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        let key = key.into();
        self.remove.remove(&key);
        self.set.insert(key, value.into());
    }

    pub fn remove(&mut self, key: impl Into<OsString>) {
        let key = key.into();
        self.set.remove(&key);
        self.remove.insert(key);
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.set.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn is_removed(&self, key: impl AsRef<OsStr>) -> bool {
        self.remove.contains(key.as_ref())
    }

    /// Layer file overrides on top; they win over the activation defaults
    pub fn apply_overrides(&mut self, overrides: &EnvOverrides) {
        for (key, value) in overrides.iter() {
            match value {
                Some(value) => self.set(key, value),
                None => self.remove(key),
            }
        }
    }

    /// Apply these changes to `command`
    pub fn apply_to(&self, command: &mut Command) {
        for key in &self.remove {
            command.env_remove(key);
        }
        command.envs(&self.set);
    }
}

fn prepend_path(bin: &Path, inherited: Option<&OsStr>) -> OsString {
    let Some(inherited) = inherited.filter(|p| !p.is_empty()) else {
        return bin.as_os_str().to_os_string();
    };

    let entries = std::iter::once(bin.to_path_buf()).chain(std::env::split_paths(inherited));
    std::env::join_paths(entries).unwrap_or_else(|e| {
        tracing::warn!("cannot extend PATH ({e}), using the virtualenv only");
        bin.as_os_str().to_os_string()
    })
}

/// Build the command for `argv` with `env` applied
pub fn build_command<S: AsRef<OsStr>>(argv: &[S], env: &LaunchEnv) -> Result<Command> {
    let (program, args) = argv.split_first().ok_or(PbundleError::EmptyCommand)?;
    let mut command = Command::new(program);
    command.args(args);
    env.apply_to(&mut command);
    Ok(command)
}

/// Run `argv` with `env`, replacing the current process where supported
pub fn launch<S: AsRef<OsStr>>(argv: &[S], env: &LaunchEnv, verbose: bool) -> Result<ExitCode> {
    let command = build_command(argv, env)?;
    if verbose {
        ui::status(&format!("Running \"{}\" ...", ui::format_command(argv)));
    }
    tracing::debug!(command = %ui::format_command(argv), "launching");
    let program = command.get_program().to_string_lossy().into_owned();
    exec(command, program)
}

#[cfg(unix)]
fn exec(mut command: Command, program: String) -> Result<ExitCode> {
    use std::os::unix::process::CommandExt;

    let err = command.exec();
    Err(PbundleError::LaunchFailed {
        program,
        reason: err.to_string(),
    })
}

#[cfg(not(unix))]
fn exec(mut command: Command, program: String) -> Result<ExitCode> {
    let status = command.status().map_err(|e| PbundleError::LaunchFailed {
        program,
        reason: e.to_string(),
    })?;

    Ok(status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .map_or(ExitCode::FAILURE, ExitCode::from))
}
