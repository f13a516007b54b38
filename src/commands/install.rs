//! Install and upgrade command implementation
//!
//! 1. Locate the project and acquire the project lock
//! 2. Bootstrap the virtualenv if it is missing
//! 3. Reconcile the virtualenv with requirements.txt
//! 4. Report what happened

use super::Context;
use crate::error::Result;
use crate::project::MANIFEST_FILE;
use crate::reconcile::{InstallMode, Outcome, PipInstaller, Reconciliation, reconcile};
use crate::ui;

/// Run the install (or upgrade) command
pub fn run(ctx: &Context, mode: InstallMode) -> Result<()> {
    let (project, _guard) = ctx.open_project()?;

    let mut installer = PipInstaller::for_project(&project);
    match reconcile(&project, &mut installer, mode)? {
        Outcome::NoOp => {
            ui::status(&format!(
                "{} unchanged since the last install, nothing to do.",
                MANIFEST_FILE
            ));
        }
        Outcome::Reconciled(report) => print_report(&report, mode),
    }

    Ok(())
}

fn print_report(report: &Reconciliation, mode: InstallMode) {
    let verb = match mode {
        InstallMode::Install => "Installed",
        InstallMode::Upgrade => "Upgraded",
    };
    ui::status(&format!("{} requirements from {}", verb, MANIFEST_FILE));

    if !report.added.is_empty() {
        ui::detail(&format!("added: {}", join(&report.added)));
    }
    if !report.removed.is_empty() {
        ui::detail(&format!("removed: {}", join(&report.removed)));
    }
    if !report.failed_uninstalls.is_empty() {
        ui::warn(&format!(
            "still installed after failed uninstall: {}",
            report.failed_uninstalls.join(", ")
        ));
    }
}

fn join<'a>(names: impl IntoIterator<Item = &'a String>) -> String {
    names
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
