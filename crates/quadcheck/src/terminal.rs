//! Styled terminal output for CLI commands.
//!
//! Status lines go to stderr; reports are printed to stdout by the commands.

use std::path::Path;

use console::style;

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", style("→").cyan(), message);
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message to stderr.
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

/// Print a dimmed, indented message to stderr.
pub fn dim(message: &str) {
    eprintln!("  {}", style(message).dim());
}

/// Print a section title.
pub fn header(message: &str) {
    eprintln!("\n{}", style(message).bold());
}

/// Print a path output (like "-> /path/to/file").
pub fn path_output(path: &Path) {
    eprintln!("  {} {}", style("→").dim(), style(path.display()).dim());
}

/// Print a pass/fail verdict for one check.
pub fn verdict(passed: bool, pass_message: &str, fail_message: &str) {
    if passed {
        success(pass_message);
    } else {
        error(fail_message);
    }
}
