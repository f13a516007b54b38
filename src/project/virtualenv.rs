//! Virtualenv bootstrap

use std::path::Path;
use std::process::Command;

use crate::error::{Result, project::virtualenv_failed};
use crate::ui;

/// Default tool used to create the virtualenv
pub const DEFAULT_VIRTUALENV: &str = "virtualenv";

/// The external tool that creates virtualenvs, e.g. `virtualenv` or `python3 -m venv`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualenvTool {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for VirtualenvTool {
    fn default() -> Self {
        Self::parse(DEFAULT_VIRTUALENV)
    }
}

impl VirtualenvTool {
    /// Split a whitespace-separated command line; the target path is appended at run time
    pub fn parse(command_line: &str) -> Self {
        let mut words = command_line.split_whitespace().map(str::to_string);
        match words.next() {
            Some(program) => Self {
                program,
                args: words.collect(),
            },
            None => Self {
                program: DEFAULT_VIRTUALENV.to_string(),
                args: Vec::new(),
            },
        }
    }

    fn command_line(&self, target: &Path) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line.push(' ');
        line.push_str(&target.display().to_string());
        line
    }

    /// Create a virtualenv at `target`, blocking until the tool exits
    pub fn create(&self, target: &Path) -> Result<()> {
        ui::status(&format!("Creating virtualenv in {}", target.display()));
        tracing::debug!(command = %self.command_line(target), "bootstrapping virtualenv");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(target)
            .status()
            .map_err(|e| virtualenv_failed(target, format!("{}: {}", self.program, e)))?;

        if !status.success() {
            return Err(virtualenv_failed(
                target,
                format!("\"{}\" {}", self.command_line(target), status),
            ));
        }

        Ok(())
    }
}
