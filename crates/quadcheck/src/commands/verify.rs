//! Verify command.

use std::path::Path;

use quadcheck::{Scenario, StateFiles, VerifyConfig, render_verification, verify_files};
use tracing::error;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

/// Handle the `verify` command.
///
/// Exits successfully only when every result matched. Operand corruption is
/// reported as a warning and does not change the exit code.
pub fn cmd_verify(dir: &Path, scenario: Scenario, tolerate_unknown: bool, show: usize) -> i32 {
    let files = StateFiles::new(dir);
    let map = scenario.address_map();
    let config = VerifyConfig {
        tolerate_unknown,
        ..Default::default()
    };

    terminal::header("Verifying simulation results");
    terminal::info(&format!(
        "{scenario} layout, results at {}",
        map.results()
    ));

    let outcome = match verify_files(&files, &map, &config) {
        Ok(outcome) => outcome,
        Err(e) if e.is_not_found() => {
            terminal::error(&format!("Input file not found: {e}"));
            terminal::dim("Make sure the generator and the simulation have been run first.");
            return EXIT_FAILURE;
        }
        Err(e) => {
            error!(error = %e, dir = %dir.display(), "verification could not run");
            terminal::error(&format!("Verification could not run: {e}"));
            return EXIT_FAILURE;
        }
    };

    print!("{}", render_verification(&outcome, show));
    println!();

    let failure = match outcome.out_of_range {
        Some(address) => format!(
            "Comparison stopped at address {address} after {} results ({} wrong)",
            outcome.total, outcome.failed
        ),
        None => format!("{} of {} results wrong", outcome.failed, outcome.total),
    };
    terminal::verdict(outcome.passed(), "All tests passed", &failure);
    if !outcome.integrity.is_clean() {
        terminal::warning(&format!(
            "{} operand addresses were modified",
            outcome.integrity.corrupted
        ));
    }

    if outcome.passed() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}
