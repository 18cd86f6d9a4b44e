//! Command-line argument definitions
//!
//! The complete CLI interface using the clap derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the decompression table calculator
///
/// Computes decompression table lookups and oxygen exposure totals for
/// surface-supplied (bell/diver) air-oxygen diving operations.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "deco-tables",
    version,
    about = "Decompression table lookup and oxygen exposure calculator for surface-supplied diving"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress log output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Run the full table lookup and exposure computation
    Compute(ComputeArgs),
    /// Look up the IMCA TUP bottom-time limit for a depth
    Limits(LimitsArgs),
    /// Run the built-in verification scenarios
    Check,
}

/// Arguments for the compute command
#[derive(Debug, Clone, Parser)]
pub struct ComputeArgs {
    /// Path to the decompression table CSV
    #[arg(
        short = 'f',
        long = "dataset",
        value_name = "FILE",
        help = "Path to the decompression table CSV"
    )]
    pub dataset: PathBuf,

    /// Planned maximum depth in msw
    #[arg(long = "depth", value_name = "MSW", help = "Planned maximum depth in msw")]
    pub depth: f64,

    /// Breathing-gas oxygen percentage, exclusive of 0 and 100
    #[arg(long = "o2", value_name = "PCT", help = "Breathing-gas oxygen percentage")]
    pub o2: f64,

    /// Planned bottom time in minutes
    ///
    /// When given, the first table row whose bottom time covers it is
    /// selected and exposure totals are computed for that row.
    #[arg(long = "time", value_name = "MIN", help = "Planned bottom time in minutes")]
    pub time: Option<f64>,

    /// Output format for the report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub format: OutputFormat,
}

/// Arguments for the limits command
#[derive(Debug, Clone, Parser)]
pub struct LimitsArgs {
    /// Depth to look up, msw
    #[arg(long = "depth", value_name = "MSW", help = "Depth to look up in msw")]
    pub depth: f64,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
