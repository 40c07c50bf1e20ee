//! Project initialization logic
//!
//! Scaffolds a starter relforge.toml and keeps the output directory out
//! of version control via .gitignore.

use std::path::Path;

use crate::config::defaults;

/// Entries to add to .gitignore
pub const GITIGNORE_ENTRIES: &[&str] = &["dist/"];

/// Marker comment for the relforge section in .gitignore
pub const GITIGNORE_MARKER: &str = "# relforge";

/// Generate the default manifest content with comments.
///
/// The starter matrix covers the targets a typical client release ships:
/// static Linux, Windows, and commented-out extras.
pub fn generate_manifest_content(project_name: &str) -> String {
    format!(
        r#"# Relforge release matrix
# Each [[target]] is built in order; artifacts land in dist/ as
# {project_name}-<os>-<arch>[.exe].

[project]
name = "{project_name}"
version = "0.1.0"
# Path to the cargo project, relative to this file
# path = "."

[build]
# Cargo profile used for every target unless overridden per target
profile = "release"
# Enforce Cargo.lock (--locked)
locked = true
# Concurrent builds; 1 = sequential
# jobs = 1
# Per-build timeout, elapse counts as failure
# timeout-secs = 3600
# Keep building after a failure instead of failing fast
# keep-going = true
# Write a SHA256SUMS file next to the artifacts
# checksums = true

[[target]]
triple = "x86_64-unknown-linux-musl"

[[target]]
triple = "x86_64-pc-windows-gnu"

# [[target]]
# triple = "aarch64-unknown-linux-musl"

# [[target]]
# triple = "x86_64-apple-darwin"
"#
    )
}

/// Generate .gitignore content for relforge
pub fn generate_gitignore_content() -> String {
    let mut content = String::from(GITIGNORE_MARKER);
    content.push('\n');
    for entry in GITIGNORE_ENTRIES {
        content.push_str(entry);
        content.push('\n');
    }
    content
}

/// Check if .gitignore already has relforge entries
pub fn gitignore_has_relforge_entries(content: &str) -> bool {
    content.contains(GITIGNORE_MARKER)
}

/// Append relforge entries to existing .gitignore content (idempotent)
pub fn append_gitignore_entries(existing: &str) -> String {
    if gitignore_has_relforge_entries(existing) {
        return existing.to_string();
    }

    let mut result = existing.to_string();
    if !result.is_empty() && !result.ends_with('\n') {
        result.push('\n');
    }
    if !result.is_empty() {
        result.push('\n');
    }
    result.push_str(&generate_gitignore_content());
    result
}

/// Check whether a manifest already exists in the directory
pub fn manifest_exists(path: &Path) -> bool {
    path.join(defaults::MANIFEST_FILE).exists()
}

/// Derive project name from directory
pub fn derive_project_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(ToString::to_string)
        .unwrap_or_else(|| "my-project".to_string())
}
