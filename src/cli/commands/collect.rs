//! Collect command implementation
//!
//! Implements `relforge collect`: run the collection phase alone over
//! existing build outputs. Useful after an out-of-band rebuild of a
//! single target, and safe to repeat - collection recreates the output
//! directory every time.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::cli::output::status;
use crate::core::collect::{self, CollectOptions};
use crate::core::manifest::Manifest;

/// Execute the collect command
pub async fn execute(project_dir: &Path, checksums: bool) -> Result<()> {
    let manifest = Manifest::load(project_dir)?;
    let matrix = manifest.matrix().context("Invalid build matrix")?;
    if matrix.is_empty() {
        bail!("Build matrix is empty; nothing to collect");
    }

    let project_root = project_dir.join(&manifest.project.path);
    let dist_dir = project_dir.join(&manifest.build.dist_dir);
    let options = CollectOptions {
        checksums: checksums || manifest.build.checksums,
    };

    let report = collect::collect_artifacts(&project_root, &matrix, &dist_dir, &options)?;

    for artifact in &report.collected {
        println!(
            "{} {} ({} bytes)",
            status::SUCCESS,
            artifact.dest.display(),
            artifact.size
        );
    }
    for missing in &report.missing {
        eprintln!("{} {missing}", status::ERROR);
    }

    if !report.is_complete() {
        bail!(
            "{} of {} artifacts missing; run 'relforge build' first",
            report.missing.len(),
            matrix.len()
        );
    }

    println!(
        "{} Collected {} artifacts into {}",
        status::SUCCESS,
        report.collected.len(),
        dist_dir.display()
    );
    Ok(())
}
