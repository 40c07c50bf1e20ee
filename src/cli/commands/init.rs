//! CLI implementation for `relforge init` command
//!
//! Scaffolds a starter relforge.toml and adds the output directory to
//! .gitignore.

use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::cli::output::status;
use crate::config::defaults;
use crate::core::init;

/// Execute the init command
pub async fn execute(project_dir: &Path, force: bool) -> Result<()> {
    let manifest_path = project_dir.join(defaults::MANIFEST_FILE);

    if init::manifest_exists(project_dir) && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            manifest_path.display()
        );
    }

    let project_name = init::derive_project_name(project_dir);
    let content = init::generate_manifest_content(&project_name);
    std::fs::write(&manifest_path, content)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    let gitignore_path = project_dir.join(".gitignore");
    let existing = std::fs::read_to_string(&gitignore_path).unwrap_or_default();
    let updated = init::append_gitignore_entries(&existing);
    let gitignore_changed = updated != existing;
    if gitignore_changed {
        std::fs::write(&gitignore_path, updated)
            .with_context(|| format!("Failed to write {}", gitignore_path.display()))?;
    }

    println!(
        "{} Created {} for '{project_name}'",
        status::SUCCESS,
        manifest_path.display()
    );
    if gitignore_changed {
        println!("{} Added dist/ to .gitignore", status::SUCCESS);
    }
    println!("  Edit the [[target]] entries, then run 'relforge build'");

    Ok(())
}
