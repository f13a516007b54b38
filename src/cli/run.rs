use std::ffi::OsString;

use clap::Parser;

/// Arguments for the run command
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(after_help = "EXAMPLES:\n  \
                  Run the test suite:\n    pbundle run nosetests -v\n\n\
                  Start a shell with the virtualenv on PATH:\n    pbundle run bash")]
pub struct RunArgs {
    /// Program to run, followed by its arguments
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "PROGRAM"
    )]
    pub command: Vec<OsString>,
}

/// Arguments for the py command
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(after_help = "EXAMPLES:\n  \
                  Start an interactive interpreter:\n    pbundle py\n\n\
                  Run a script:\n    pbundle py manage.py runserver")]
pub struct PyArgs {
    /// Arguments passed to python
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<OsString>,
}
