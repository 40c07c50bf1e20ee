//! CLI implementation for `relforge clean` command
//!
//! Removes the collected-artifact output directory.

use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::output::status;
use crate::core::clean::{clean_project, has_artifacts};
use crate::core::manifest::Manifest;

/// Execute the clean command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let manifest = Manifest::load(project_dir)?;

    if !has_artifacts(project_dir, &manifest.build.dist_dir) {
        println!("{} Nothing to clean", status::SUCCESS);
        return Ok(());
    }

    let result = clean_project(project_dir, &manifest.build.dist_dir)
        .with_context(|| "Failed to clean collected artifacts")?;

    if result.removed {
        println!("{} Removed {}", status::SUCCESS, result.path.display());
    } else {
        println!("{} Nothing to clean", status::SUCCESS);
    }

    Ok(())
}
