//! pbundle - Bundler for Python
//!
//! Keeps a project-local virtualenv in sync with the nearest requirements.txt
//! and runs programs inside it. Installation itself is delegated to pip and
//! the virtualenv to an external tool.

use std::process::ExitCode;

use clap::Parser;
use clap::error::{ContextKind, ErrorKind};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod diff;
mod error;
mod launcher;
mod manifest;
mod project;
mod reconcile;
mod requirement;
#[cfg(test)]
mod test_fixtures;
mod ui;

use cli::{Cli, Commands};
use commands::Context;
use error::{EXIT_USAGE, FailureKind, PbundleError, Result};
use reconcile::InstallMode;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return report_cli_error(&e),
    };

    init_logging(cli.verbose);

    match dispatch(cli) {
        Ok(code) => code,
        Err(e) => report(&e),
    }
}

fn dispatch(cli: Cli) -> Result<ExitCode> {
    let ctx = Context::from_cli(&cli)?;

    let done = match cli.command_or_default() {
        Commands::Install => commands::install::run(&ctx, InstallMode::Install),
        Commands::Upgrade => commands::install::run(&ctx, InstallMode::Upgrade),
        Commands::Init => commands::init::run(&ctx),
        Commands::Run(args) => return commands::run::run(&ctx, &args.command),
        Commands::Py(args) => return commands::run::py(&ctx, &args.args),
        Commands::Completions(args) => commands::completions::run(&args),
        Commands::Version => commands::version::run(),
    };

    done.map(|()| ExitCode::SUCCESS)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PBUNDLE_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn report(err: &PbundleError) -> ExitCode {
    match err.kind() {
        FailureKind::Usage => {
            ui::error(&err.to_string());
            if let Some(help) = miette::Diagnostic::help(err) {
                eprintln!("   {}", help);
            }
        }
        FailureKind::Internal => {
            ui::error("Internal error in pbundle:");
            eprintln!();
            eprintln!("   {}", err);
        }
    }

    ExitCode::from(err.exit_code())
}

/// Help and version requests succeed; an unknown command is a usage error like
/// any other; remaining argument errors keep clap's rendering with exit code 1.
fn report_cli_error(err: &clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        ErrorKind::InvalidSubcommand => {
            let command = err
                .get(ContextKind::InvalidSubcommand)
                .map(ToString::to_string)
                .unwrap_or_default();
            report(&PbundleError::UnknownCommand { command })
        }
        _ => {
            let _ = err.print();
            ExitCode::from(EXIT_USAGE)
        }
    }
}
