//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod build;
pub mod check;
pub mod clean;
pub mod collect;
pub mod doctor;
pub mod init;
pub mod list;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a starter relforge.toml in the current directory
    Init {
        /// Overwrite an existing manifest
        #[arg(short, long)]
        force: bool,
    },

    /// Build the full matrix, then collect the artifacts
    Build {
        /// Build only the given triples (repeatable; must be in the matrix)
        #[arg(short, long = "target", value_name = "TRIPLE")]
        targets: Vec<String>,

        /// Number of concurrent builds (1 = sequential)
        #[arg(short, long)]
        jobs: Option<usize>,

        /// Keep building remaining targets after a failure
        #[arg(long)]
        keep_going: bool,

        /// Per-build timeout in seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,

        /// Build only; skip the collection phase
        #[arg(long)]
        no_collect: bool,

        /// Write a SHA256SUMS file next to the collected artifacts
        #[arg(long)]
        checksums: bool,
    },

    /// Collect already-built artifacts into the output directory
    Collect {
        /// Write a SHA256SUMS file next to the collected artifacts
        #[arg(long)]
        checksums: bool,
    },

    /// Print the build matrix in order
    List {
        /// Output in JSON format for scripting
        #[arg(long)]
        json: bool,
    },

    /// Validate the manifest without building
    Check,

    /// Remove collected artifacts
    Clean,

    /// Check the cross-compilation toolchain
    Doctor,
}

impl Default for Commands {
    fn default() -> Self {
        Self::Build {
            targets: Vec::new(),
            jobs: None,
            keep_going: false,
            timeout: None,
            no_collect: false,
            checksums: false,
        }
    }
}

impl Commands {
    /// Execute the command
    pub async fn run(self, quiet: bool) -> Result<()> {
        let current_dir = std::env::current_dir()?;
        match self {
            Self::Init { force } => init::execute(&current_dir, force).await,
            Self::Build {
                targets,
                jobs,
                keep_going,
                timeout,
                no_collect,
                checksums,
            } => {
                let options = build::BuildOptions {
                    targets,
                    jobs,
                    keep_going,
                    timeout,
                    no_collect,
                    checksums,
                };
                build::execute(&current_dir, options, quiet).await
            }
            Self::Collect { checksums } => collect::execute(&current_dir, checksums).await,
            Self::List { json } => list::execute(&current_dir, json).await,
            Self::Check => check::execute(&current_dir).await,
            Self::Clean => clean::execute(&current_dir).await,
            Self::Doctor => doctor::execute(&current_dir).await,
        }
    }
}
