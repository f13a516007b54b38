//! Common test utilities for pbundle integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// A throwaway project directory
pub struct TestProject {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty directory without a requirements.txt
    pub fn empty() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Create a project whose requirements.txt holds `requirements`
    pub fn with_requirements(requirements: &str) -> Self {
        let project = Self::empty();
        project.write_file("requirements.txt", requirements);
        project
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// pbundle command running inside the project, isolated from the caller's settings
    pub fn pbundle(&self) -> Command {
        let mut cmd = pbundle_cmd();
        cmd.current_dir(&self.path)
            .env_remove("PBUNDLE_DIRECTORY")
            .env_remove("PBUNDLE_VIRTUALENV")
            .env_remove("PBUNDLE_LOG");
        cmd
    }

    /// Lines pip was invoked with, as recorded by the fake virtualenv
    #[cfg(unix)]
    pub fn pip_calls(&self) -> Vec<String> {
        let log = self.path.join(".pbundle/virtualenv/pip.log");
        std::fs::read_to_string(log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// pbundle command that bootstraps the fake virtualenv below
    #[cfg(unix)]
    pub fn pbundle_with_fake_virtualenv(&self) -> Command {
        let tool = fake_virtualenv(&self.temp);
        let mut cmd = self.pbundle();
        // Run through sh so the freshly written script is never exec'd directly
        cmd.env("PBUNDLE_VIRTUALENV", format!("sh {}", tool.display()));
        cmd
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn pbundle_cmd() -> Command {
    Command::cargo_bin("pbundle").expect("pbundle binary is built")
}

/// Stand-in for `virtualenv`: creates `bin/pip`, which logs its arguments and
/// exits with `$FAKE_PIP_EXIT`, and `bin/python`, which echoes its environment
#[cfg(unix)]
const FAKE_VIRTUALENV: &str = r#"#!/bin/sh
set -e
mkdir -p "$1/bin"
cat > "$1/bin/pip" <<'EOF'
#!/bin/sh
echo "$*" >> "$(dirname "$0")/../pip.log"
exit "${FAKE_PIP_EXIT:-0}"
EOF
cat > "$1/bin/python" <<'EOF'
#!/bin/sh
echo "python $* VIRTUAL_ENV=$VIRTUAL_ENV PYTHONHOME=${PYTHONHOME:-unset}"
EOF
chmod +x "$1/bin/pip" "$1/bin/python"
"#;

/// Write the fake virtualenv script next to the project and return its path
#[cfg(unix)]
fn fake_virtualenv(temp: &TempDir) -> PathBuf {
    let tools = temp.path().join("tools");
    std::fs::create_dir_all(&tools).expect("Failed to create tools directory");
    let script = tools.join("fake-virtualenv");
    std::fs::write(&script, FAKE_VIRTUALENV).expect("Failed to write fake virtualenv");
    script
}
