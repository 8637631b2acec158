//! quadcheck CLI - banked 64-bit adder verification harness

mod cli;
mod commands;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    // Reports go to stdout; keep logs quiet by default while reporting
    let default_level = if cli.verbose {
        "debug"
    } else if cli.silent {
        "error"
    } else {
        match &cli.command {
            Commands::Compare { .. } | Commands::Verify { .. } => "warn",
            Commands::Generate { .. } => "info",
        }
    };
    let mut filter = EnvFilter::from_default_env();
    for krate in ["quadcheck", "quadcheck_mem"] {
        if let Ok(directive) = format!("{krate}={default_level}").parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = commands::run_command(&cli);
    std::process::exit(exit_code);
}
