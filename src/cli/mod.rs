//! CLI definitions using clap derive API
//!
//! The set of commands is closed: [`Commands`] is matched exhaustively in
//! `main`. When no command is given, `install` runs.

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod run;

pub use completions::CompletionsArgs;
pub use run::{PyArgs, RunArgs};

use crate::project::virtualenv::DEFAULT_VIRTUALENV;

/// pbundle - Bundler for Python
///
/// Keeps a project-local virtualenv in sync with requirements.txt.
#[derive(Parser, Debug)]
#[command(
    name = "pbundle",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Bundler for Python: keeps a virtualenv in sync with requirements.txt",
    long_about = "Bundler for Python.\n\n\
                  pbundle finds the nearest requirements.txt, keeps a virtualenv for it in .pbundle/, \
                  runs pip whenever the requirements change (uninstalling removed ones), \
                  and runs programs inside that virtualenv.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  pbundle                      \x1b[90m# Run pip, if needed\x1b[0m\n   \
                  pbundle upgrade              \x1b[90m# Run pip with --upgrade\x1b[0m\n   \
                  pbundle init                 \x1b[90m# Create an empty requirements.txt\x1b[0m\n   \
                  pbundle run nosetests -v     \x1b[90m# Run a program in the virtualenv\x1b[0m\n   \
                  pbundle py manage.py shell   \x1b[90m# Run the virtualenv's python\x1b[0m\n"
)]
pub struct Cli {
    /// Directory to start searching for requirements.txt from (defaults to current directory)
    #[arg(long, short = 'C', global = true, env = "PBUNDLE_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Command used to create the virtualenv, e.g. "python3 -m venv"
    #[arg(
        long,
        global = true,
        env = "PBUNDLE_VIRTUALENV",
        default_value = DEFAULT_VIRTUALENV,
        value_name = "COMMAND"
    )]
    pub virtualenv: String,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run pip, if needed (also uninstalls removed requirements)
    Install,

    /// Run pip with --upgrade
    Upgrade,

    /// Create an empty requirements.txt
    Init,

    /// Run a program in the activated virtualenv
    Run(RunArgs),

    /// Run the activated python with arguments
    Py(PyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),

    /// Show version information
    #[command(hide = true)]
    Version,
}

impl Cli {
    /// The requested command, `install` when none was given
    pub fn command_or_default(self) -> Commands {
        self.command.unwrap_or(Commands::Install)
    }
}
