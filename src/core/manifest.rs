//! Manifest (relforge.toml) parsing
//!
//! The manifest is the configuration file for a relforge project: which
//! cargo project to build, the ordered target matrix, and the build and
//! collection settings. The matrix lives in configuration rather than in
//! code so it can change without recompiling the orchestrator.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::defaults;
use crate::core::target::{BuildTarget, TargetTriple};
use crate::error::{ManifestError, TargetError};

/// The main project manifest (relforge.toml)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    /// Project configuration
    pub project: ProjectConfig,

    /// Build configuration
    #[serde(default)]
    pub build: BuildConfig,

    /// Ordered build matrix
    #[serde(default, rename = "target")]
    pub targets: Vec<TargetEntry>,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectConfig {
    /// Project name (cargo package and binary name)
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Path to the cargo project, relative to the manifest
    #[serde(default = "default_project_path")]
    pub path: String,

    /// Project description
    #[serde(default)]
    pub description: Option<String>,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_project_path() -> String {
    ".".to_string()
}

/// Build and collection configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuildConfig {
    /// Default cargo profile for matrix entries
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Enforce the dependency lock file (`cargo build --locked`)
    #[serde(default = "default_locked")]
    pub locked: bool,

    /// Number of concurrent build jobs (1 = sequential)
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Per-build timeout in seconds (elapse counts as build failure)
    #[serde(default, rename = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// Run the whole matrix even after a failure instead of failing fast
    #[serde(default, rename = "keep-going")]
    pub keep_going: bool,

    /// Output directory for collected artifacts, relative to the manifest
    #[serde(default = "default_dist_dir", rename = "dist-dir")]
    pub dist_dir: String,

    /// Write a SHA256SUMS file next to the collected artifacts
    #[serde(default)]
    pub checksums: bool,
}

fn default_profile() -> String {
    defaults::DEFAULT_PROFILE.to_string()
}

fn default_locked() -> bool {
    true
}

fn default_dist_dir() -> String {
    defaults::DEFAULT_DIST_DIR.to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            locked: true,
            jobs: None,
            timeout_secs: None,
            keep_going: false,
            dist_dir: default_dist_dir(),
            checksums: false,
        }
    }
}

/// One matrix entry in the manifest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetEntry {
    /// Target triple string
    pub triple: String,

    /// Per-target profile override
    #[serde(default)]
    pub profile: Option<String>,
}

impl Manifest {
    /// Parse from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ManifestError> {
        toml::from_str(content).map_err(|e| ManifestError::Parse {
            source: Box::new(e),
        })
    }

    /// Load the manifest from a project directory
    pub fn load(project_dir: &Path) -> Result<Self, ManifestError> {
        let manifest_path = project_dir.join(defaults::MANIFEST_FILE);
        if !manifest_path.exists() {
            return Err(ManifestError::NotFound {
                path: manifest_path,
            });
        }
        let content =
            std::fs::read_to_string(&manifest_path).map_err(|e| ManifestError::Read {
                path: manifest_path,
                error: e.to_string(),
            })?;
        Self::from_toml(&content)
    }

    /// Build the ordered matrix from the manifest entries.
    ///
    /// Target order is manifest order; each entry inherits the default
    /// profile unless it carries its own override.
    pub fn matrix(&self) -> Result<Vec<BuildTarget>, TargetError> {
        self.targets
            .iter()
            .map(|entry| {
                let triple = TargetTriple::parse(&entry.triple)?;
                let profile = entry.profile.as_deref().unwrap_or(&self.build.profile);
                Ok(BuildTarget::new(&self.project.name, triple, profile))
            })
            .collect()
    }
}
