//! List command implementation
//!
//! Implements `relforge list`: print the build matrix in manifest order,
//! with the artifact name each target will release as.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::manifest::Manifest;

/// One matrix row for JSON output
#[derive(Debug, Serialize)]
struct ListEntry {
    triple: String,
    profile: String,
    artifact: String,
}

/// Execute the list command
pub async fn execute(project_dir: &Path, json: bool) -> Result<()> {
    let manifest = Manifest::load(project_dir)?;
    let matrix = manifest.matrix().context("Invalid build matrix")?;

    let entries: Vec<ListEntry> = matrix
        .iter()
        .map(|target| ListEntry {
            triple: target.triple.as_str().to_string(),
            profile: target.profile.clone(),
            artifact: target.triple.artifact_name(&target.project),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Build matrix is empty");
        return Ok(());
    }

    println!("Build matrix for {}:", manifest.project.name);
    for entry in &entries {
        println!(
            "  {:<40} [{}]  ->  {}",
            entry.triple, entry.profile, entry.artifact
        );
    }
    Ok(())
}
