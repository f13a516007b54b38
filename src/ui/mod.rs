//! Console presentation
//!
//! All user-facing diagnostics go straight to the terminal:
//! - status lines (`==> ...`) on stdout
//! - warnings (`W: ...`) and errors (`E: ...`) on stderr
//!
//! `tracing` is reserved for debug diagnostics enabled with `-v` or `PBUNDLE_LOG`.

use console::Style;

/// Print a progress line
pub fn status(message: &str) {
    println!("{} {}", Style::new().bold().green().apply_to("==>"), message);
}

/// Print a detail line below a status line
pub fn detail(message: &str) {
    println!("    {}", message);
}

/// Print a non-fatal warning
pub fn warn(message: &str) {
    eprintln!(
        "{} {}",
        Style::new().for_stderr().bold().yellow().apply_to("W:"),
        message
    );
}

/// Print a user-facing error
pub fn error(message: &str) {
    eprintln!(
        "{} {}",
        Style::new().for_stderr().bold().red().apply_to("E:"),
        message
    );
}

/// Quote an argument vector the way it is echoed back to the user
pub fn format_command<S: AsRef<std::ffi::OsStr>>(argv: &[S]) -> String {
    argv.iter()
        .map(|arg| arg.as_ref().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
