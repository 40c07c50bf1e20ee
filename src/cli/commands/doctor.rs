//! CLI command for `relforge doctor`
//!
//! Checks the cross-compilation toolchain and reports issues with
//! suggestions.

use std::path::Path;

use anyhow::{bail, Result};

use crate::cli::output::status;
use crate::core::doctor::{self, DoctorReport};
use crate::core::manifest::Manifest;

/// Execute the doctor command
pub async fn execute(project_dir: &Path) -> Result<()> {
    let mut report = DoctorReport::new();
    report.add_check(doctor::check_cargo());
    report.add_check(doctor::check_rustup());

    // Per-target checks need both a manifest and rustup; skip quietly
    // when either is absent.
    if let Ok(manifest) = Manifest::load(project_dir) {
        if let Some(installed) = doctor::installed_rustup_targets() {
            for entry in &manifest.targets {
                report.add_check(doctor::check_matrix_target(&entry.triple, &installed));
            }
        }
    }

    for check in &report.checks {
        if check.passed {
            match &check.version {
                Some(version) => println!("{} {} ({version})", status::SUCCESS, check.name),
                None => println!("{} {}", status::SUCCESS, check.name),
            }
        } else {
            let error = check.error.as_deref().unwrap_or("failed");
            println!("{} {}: {error}", status::ERROR, check.name);
            if let Some(suggestion) = &check.suggestion {
                println!("    {suggestion}");
            }
        }
    }

    println!(
        "\n{} checks passed, {} failed",
        report.passed_count(),
        report.failed_count()
    );

    if !report.all_required_passed() {
        bail!("Required toolchain components are missing");
    }
    Ok(())
}
