//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use anyhow::Result;
use clap::Parser;

use commands::Commands;

/// Relforge - multi-target release build orchestrator
///
/// Builds a project for every target in the release matrix and collects
/// the binaries into one directory. Running with no subcommand is the
/// same as `relforge build`.
#[derive(Parser, Debug)]
#[command(name = "relforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let quiet = self.quiet;
        // The bare invocation runs the full pipeline: build the whole
        // matrix, then collect.
        let command = self.command.unwrap_or_default();
        command.run(quiet).await
    }
}
