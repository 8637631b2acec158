//! Compare command.
//!
//! Always exits successfully once arguments parse; the verdict is printed and
//! recorded in the report file instead.

use std::path::Path;

use quadcheck::compare_files;
use tracing::error;

use crate::cli::EXIT_SUCCESS;
use crate::terminal;

/// Handle the `compare` command.
pub fn cmd_compare(expected: &Path, actual: &Path, report: &Path) -> i32 {
    let diff = match compare_files(expected, actual) {
        Ok(diff) => diff,
        Err(e) if e.is_not_found() => {
            terminal::error("One or both files not found. Please check paths:");
            terminal::dim(&format!("File 1: {}", expected.display()));
            terminal::dim(&format!("File 2: {}", actual.display()));
            return EXIT_SUCCESS;
        }
        Err(e) => {
            error!(error = %e, "comparison failed");
            terminal::error(&format!("Comparison could not run: {e}"));
            return EXIT_SUCCESS;
        }
    };

    if diff.passed() {
        println!("PASSED: simulation output matches expected results.");
    } else {
        println!("FAILED: Mismatches found in {}", actual.display());
        println!("Writing mismatches to {}", report.display());
    }

    if let Err(e) = diff.sync_report(report) {
        error!(error = %e, "failed to update report");
        terminal::warning(&format!("Could not update {}: {e}", report.display()));
    }

    for mismatch in &diff.mismatches {
        println!("{mismatch}\n");
    }

    EXIT_SUCCESS
}
