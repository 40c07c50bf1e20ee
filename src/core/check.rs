//! Check command logic
//!
//! Validates the manifest and reports what would be built, without
//! invoking any build. Structural problems (unparseable triples,
//! duplicate matrix entries, empty project name) are errors; things that
//! only matter at build time (missing toolchain, unlockable project
//! path) are warnings.

use std::collections::HashSet;
use std::path::Path;

use crate::core::manifest::Manifest;
use crate::core::target::TargetTriple;

/// Result of the check operation
#[derive(Debug, Default)]
pub struct CheckResult {
    /// Target triples that would be built, in matrix order
    pub targets: Vec<String>,
    /// Problems that make the manifest unusable
    pub errors: Vec<String>,
    /// Problems worth knowing about that do not block a build
    pub warnings: Vec<String>,
}

impl CheckResult {
    /// Check if the manifest can drive a build
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a loaded manifest against its project directory
pub fn check(project_dir: &Path, manifest: &Manifest) -> CheckResult {
    let mut result = CheckResult::default();

    if manifest.project.name.trim().is_empty() {
        result
            .errors
            .push("project name must not be empty".to_string());
    }

    if semver::Version::parse(&manifest.project.version).is_err() {
        result.warnings.push(format!(
            "project version '{}' is not valid semver",
            manifest.project.version
        ));
    }

    if manifest.targets.is_empty() {
        result
            .warnings
            .push("build matrix is empty, nothing would be built".to_string());
    }

    let mut seen: HashSet<(String, String)> = HashSet::new();
    for entry in &manifest.targets {
        match TargetTriple::parse(&entry.triple) {
            Ok(triple) => result.targets.push(triple.as_str().to_string()),
            Err(e) => result.errors.push(e.to_string()),
        }

        let profile = entry
            .profile
            .clone()
            .unwrap_or_else(|| manifest.build.profile.clone());
        if !seen.insert((entry.triple.clone(), profile)) {
            result.errors.push(format!(
                "duplicate matrix entry for '{}'",
                entry.triple
            ));
        }
    }

    if let Some(0) = manifest.build.jobs {
        result
            .warnings
            .push("jobs = 0 is treated as 1 (sequential)".to_string());
    }

    let project_root = project_dir.join(&manifest.project.path);
    if !project_root.join("Cargo.toml").exists() {
        result.warnings.push(format!(
            "no Cargo.toml under project path '{}'",
            manifest.project.path
        ));
    } else if manifest.build.locked && !project_root.join("Cargo.lock").exists() {
        result.warnings.push(
            "locked builds requested but the project has no Cargo.lock".to_string(),
        );
    }

    if which::which("cargo").is_err() {
        result
            .warnings
            .push("cargo not found in PATH".to_string());
    }

    result
}
