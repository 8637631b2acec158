//! Command implementations.
//!
//! Each submodule handles one CLI command.

mod compare;
mod generate;
mod verify;

use crate::cli::{Cli, Commands};

/// Dispatch CLI command to the appropriate handler.
pub fn run_command(cli: &Cli) -> i32 {
    match &cli.command {
        Commands::Generate { .. } => handle_generate(cli),
        Commands::Compare { .. } => handle_compare(cli),
        Commands::Verify { .. } => handle_verify(cli),
    }
}

fn handle_generate(cli: &Cli) -> i32 {
    let Commands::Generate {
        output,
        scenario,
        seed,
        debug,
    } = &cli.command
    else {
        unreachable!("generate command variant mismatch");
    };

    generate::cmd_generate(output, (*scenario).into(), *seed, *debug)
}

fn handle_compare(cli: &Cli) -> i32 {
    let Commands::Compare {
        expected,
        actual,
        report,
    } = &cli.command
    else {
        unreachable!("compare command variant mismatch");
    };

    compare::cmd_compare(expected, actual, report)
}

fn handle_verify(cli: &Cli) -> i32 {
    let Commands::Verify {
        dir,
        scenario,
        tolerate_unknown,
        show,
    } = &cli.command
    else {
        unreachable!("verify command variant mismatch");
    };

    verify::cmd_verify(dir, (*scenario).into(), *tolerate_unknown, *show)
}
