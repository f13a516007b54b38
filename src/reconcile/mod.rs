//! Reconciling the virtualenv with requirements.txt
//!
//! The reconciliation is a linear, non-retrying sequence:
//!
//! 1. Compare the declared requirements with the last snapshot. In install
//!    mode an unchanged set ends here ([`Outcome::NoOp`]).
//! 2. Uninstall every name that disappeared, one blocking call each. A failed
//!    uninstall is reported and the loop carries on.
//! 3. Run the installer once over the whole requirements file.
//! 4. Only if that succeeded, overwrite the snapshot.
//!
//! An install failure leaves the snapshot as it was, so the next run
//! computes the same diff and repeats the same work.

pub mod pip;

use std::collections::BTreeSet;
use std::path::Path;

use crate::diff;
use crate::error::Result;
use crate::manifest;
use crate::project::Project;
use crate::ui;

pub use pip::PipInstaller;

/// Flavour of the install pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// Install what is missing, only when the requirements changed
    Install,
    /// Always run, upgrading every requirement to the newest allowed version
    Upgrade,
}

/// External package installer
pub trait Installer {
    /// Remove one installed package
    fn uninstall(&mut self, name: &str) -> Result<()>;

    /// Install everything listed in the requirements file at `manifest`
    fn install(&mut self, manifest: &Path, mode: InstallMode) -> Result<()>;
}

/// What a successful reconciliation did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
    /// Removed names whose uninstall failed
    pub failed_uninstalls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Requirements unchanged since the last install
    NoOp,
    /// Installer ran and the snapshot was updated
    Reconciled(Reconciliation),
}

/// Bring the installed packages in line with the project's requirements
pub fn reconcile<I: Installer + ?Sized>(
    project: &Project,
    installer: &mut I,
    mode: InstallMode,
) -> Result<Outcome> {
    let manifest_path = project.manifest_path();
    let declared = manifest::load(&manifest_path)?;
    for skipped in &declared.skipped {
        ui::warn(&skipped.to_string());
    }

    let snapshot = manifest::load_snapshot(&project.snapshot_path())?;
    for skipped in &snapshot.skipped {
        tracing::debug!(%skipped, "unreadable snapshot entry");
    }

    let current = &declared.requirements;
    let last = &snapshot.requirements;

    if mode == InstallMode::Install && !diff::changed(current, last) {
        tracing::debug!(state = "noop", "requirements unchanged");
        return Ok(Outcome::NoOp);
    }

    let mut report = Reconciliation {
        added: diff::added(current, last),
        removed: diff::removed(current, last),
        failed_uninstalls: Vec::new(),
    };

    tracing::debug!(state = "uninstalling", count = report.removed.len());
    for name in &report.removed {
        if let Err(e) = installer.uninstall(name) {
            ui::warn(&format!("could not uninstall {}: {}", name, e));
            report.failed_uninstalls.push(name.clone());
        }
    }

    tracing::debug!(state = "installing", ?mode);
    installer.install(&manifest_path, mode)?;

    tracing::debug!(state = "persisting");
    project.ensure_work_dir()?;
    manifest::write_snapshot(&project.snapshot_path(), current)?;

    tracing::debug!(state = "done");
    Ok(Outcome::Reconciled(report))
}
