//! CLI definitions and argument types.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use quadcheck::{DEFAULT_SHOWN_MISMATCHES, MISMATCH_REPORT, Scenario};

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

#[derive(Parser)]
#[command(name = "quadcheck")]
#[command(about = "Verification harness for a banked 64-bit adder")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub silent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate pre-state and expected post-state memory images
    Generate {
        /// Output directory (created if missing)
        #[arg(value_name = "DIR")]
        output: PathBuf,

        /// Memory layout
        #[arg(long, value_enum, default_value = "split")]
        scenario: ScenarioArg,

        /// RNG seed for reproducible operands (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Also write combined binary+decimal trace files
        #[arg(long)]
        debug: bool,
    },
    /// Compare two files line by line and maintain a mismatch report
    Compare {
        /// Expected output file
        #[arg(value_name = "EXPECTED")]
        expected: PathBuf,

        /// Simulator output file
        #[arg(value_name = "ACTUAL")]
        actual: PathBuf,

        /// Mismatch report path
        #[arg(long, default_value = MISMATCH_REPORT)]
        report: PathBuf,
    },
    /// Verify simulator post-state as 64-bit addition results
    Verify {
        /// Directory holding the pre-state, expected, and simulator images
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Memory layout the images were generated for
        #[arg(long, value_enum, default_value = "split")]
        scenario: ScenarioArg,

        /// Accept all-x (uninitialized) words in the images
        #[arg(long)]
        tolerate_unknown: bool,

        /// Number of mismatches to show in detail
        #[arg(long, default_value_t = DEFAULT_SHOWN_MISMATCHES)]
        show: usize,
    },
}

/// Memory layout.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ScenarioArg {
    /// Operand A and B in separate 256-word regions, results at 768
    #[value(alias = "x")]
    Split,
    /// Operand pairs interleaved in 256 words, results at 384
    #[value(alias = "y")]
    Interleaved,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Split => Self::Split,
            ScenarioArg::Interleaved => Self::Interleaved,
        }
    }
}
