//! Run and py command implementations

use std::ffi::OsString;
use std::process::ExitCode;

use super::Context;
use crate::error::{PbundleError, Result};
use crate::launcher::{LaunchEnv, launch};

/// Interpreter started by `pbundle py`
pub const PYTHON: &str = "python";

/// Run `argv` inside the project's virtualenv
pub fn run(ctx: &Context, argv: &[OsString]) -> Result<ExitCode> {
    if argv.is_empty() {
        return Err(PbundleError::EmptyCommand);
    }

    let (project, guard) = ctx.open_project()?;
    drop(guard);
    let env = LaunchEnv::for_project(&project);
    launch(argv, &env, ctx.verbose)
}

/// Run the virtualenv's python with `args`
pub fn py(ctx: &Context, args: &[OsString]) -> Result<ExitCode> {
    run(ctx, &python_argv(args))
}

fn python_argv(args: &[OsString]) -> Vec<OsString> {
    std::iter::once(OsString::from(PYTHON))
        .chain(args.iter().cloned())
        .collect()
}
