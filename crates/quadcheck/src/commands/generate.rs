//! Generate command.

use std::path::Path;

use quadcheck::{GenerateConfig, Scenario, StateFiles, generate_to_dir};
use tracing::error;

use crate::cli::{EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal;

/// Number of test cases echoed after generation.
const SAMPLE_CASES: usize = 5;

/// Handle the `generate` command.
pub fn cmd_generate(output: &Path, scenario: Scenario, seed: Option<u64>, debug: bool) -> i32 {
    let config = GenerateConfig {
        scenario,
        seed,
        debug,
    };
    let files = StateFiles::new(output);

    let run = match generate_to_dir(&config, &files) {
        Ok(run) => run,
        Err(e) => {
            error!(error = %e, dir = %output.display(), "generation failed");
            terminal::error(&format!("Failed to generate test files: {e}"));
            return EXIT_FAILURE;
        }
    };

    terminal::success(&format!(
        "Generated {} test cases ({scenario} layout, seed {})",
        run.images.cases.len(),
        run.seed
    ));
    let pre = files.pre_state();
    let post = files.expected_post_state();
    for path in [&pre.upper, &pre.lower, &post.upper, &post.lower] {
        terminal::path_output(path);
    }
    if debug {
        terminal::path_output(&files.pre_state_trace());
        terminal::path_output(&files.post_state_trace());
    }

    terminal::header(&format!("Sample test cases (first {SAMPLE_CASES}):"));
    for case in run.images.cases.iter().take(SAMPLE_CASES) {
        println!(
            "  [{}] 0x{:016X} + 0x{:016X} = 0x{:016X}",
            case.slot, case.operand_a, case.operand_b, case.result
        );
    }

    EXIT_SUCCESS
}
