//! [`Installer`] backed by the virtualenv's own pip

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{InstallMode, Installer};
use crate::error::{
    Result,
    process::{command_failed, spawn_failed},
};
use crate::launcher::{LaunchEnv, PATH, build_command};
use crate::project::Project;
use crate::ui;

/// Runs `<virtualenv>/bin/pip` with the virtualenv activated
#[derive(Debug, Clone)]
pub struct PipInstaller {
    pip: PathBuf,
    env: LaunchEnv,
}

impl PipInstaller {
    pub fn new(pip: PathBuf, env: LaunchEnv) -> Self {
        Self { pip, env }
    }

    pub fn for_project(project: &Project) -> Self {
        let inherited = std::env::var_os(PATH);
        let env = LaunchEnv::for_virtualenv(
            &project.virtualenv_path(),
            &project.virtualenv_bin(),
            inherited.as_deref(),
        );
        let pip = project
            .virtualenv_bin()
            .join(format!("pip{}", std::env::consts::EXE_SUFFIX));
        Self::new(pip, env)
    }

    /// Arguments for an install pass over `manifest`
    pub fn install_args(manifest: &Path, mode: InstallMode) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["install".into()];
        if mode == InstallMode::Upgrade {
            args.push("--upgrade".into());
        }
        args.push("-r".into());
        args.push(manifest.as_os_str().to_os_string());
        args
    }

    /// Arguments for removing `name` without prompting
    pub fn uninstall_args(name: &str) -> Vec<OsString> {
        vec!["uninstall".into(), "-y".into(), name.into()]
    }

    fn run(&self, args: Vec<OsString>) -> Result<()> {
        let shown = format!("pip {}", ui::format_command(&args));
        ui::status(&format!("Running \"{}\" ...", shown));

        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push(self.pip.clone().into_os_string());
        argv.extend(args);

        let status = build_command(&argv, &self.env)?
            .status()
            .map_err(|e| spawn_failed(&shown, &e))?;
        tracing::debug!(command = %shown, %status, "pip finished");

        if status.success() {
            Ok(())
        } else {
            Err(command_failed(shown, status))
        }
    }
}

impl Installer for PipInstaller {
    fn uninstall(&mut self, name: &str) -> Result<()> {
        self.run(Self::uninstall_args(name))
    }

    fn install(&mut self, manifest: &Path, mode: InstallMode) -> Result<()> {
        self.run(Self::install_args(manifest, mode))
    }
}
