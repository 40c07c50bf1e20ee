//! Check command implementation
//!
//! Implements `relforge check` to validate the manifest without
//! building.

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::output::status;
use crate::core::check;
use crate::core::manifest::Manifest;

/// Execute the check command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let manifest = Manifest::load(project_dir)?;
    let result = check::check(project_dir, &manifest);

    for error in &result.errors {
        eprintln!("{} {error}", status::ERROR);
    }
    for warning in &result.warnings {
        println!("{} {warning}", status::WARNING);
    }

    if !result.is_valid() {
        bail!("Manifest check failed with {} error(s)", result.errors.len());
    }

    println!(
        "{} Manifest OK: {} would build {} target(s)",
        status::SUCCESS,
        manifest.project.name,
        result.targets.len()
    );
    for triple in &result.targets {
        println!("  {triple}");
    }
    Ok(())
}
