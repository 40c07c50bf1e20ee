//! Cargo build invocation
//!
//! The external build capability behind the matrix runner: one
//! `cargo build --target <triple>` per matrix entry, pinned to the lock
//! file. Cargo owns the output location; on success the binary is at the
//! path given by [`crate::core::artifact::expected_artifact_path`].

use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use crate::core::artifact;
use crate::core::runner::BuildCapability;
use crate::core::target::BuildTarget;
use crate::error::BuildError;

/// Cargo-backed build capability
#[derive(Debug, Clone)]
pub struct CargoBuilder {
    project_root: PathBuf,
    locked: bool,
}

impl CargoBuilder {
    /// Create a builder rooted at the cargo project directory
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            locked: true,
        }
    }

    /// Enforce (or relax) `--locked`
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Assemble the cargo command line for one target
    fn command(&self, target: &BuildTarget) -> Command {
        let mut cmd = Command::new("cargo");
        cmd.arg("build")
            .arg("--manifest-path")
            .arg(self.project_root.join("Cargo.toml"))
            .arg("--target")
            .arg(target.triple.as_str());

        match target.profile.as_str() {
            "release" => {
                cmd.arg("--release");
            }
            "dev" => {}
            profile => {
                cmd.arg("--profile").arg(profile);
            }
        }

        if self.locked {
            cmd.arg("--locked");
        }

        cmd.current_dir(&self.project_root);
        cmd.stdin(Stdio::null());
        // The runner drops this future on timeout; the child must not
        // outlive it.
        cmd.kill_on_drop(true);
        cmd
    }
}

impl BuildCapability for CargoBuilder {
    fn build(&self, target: &BuildTarget) -> impl Future<Output = Result<PathBuf, BuildError>> {
        let mut cmd = self.command(target);
        let triple = target.triple.as_str().to_string();
        let artifact = artifact::expected_artifact_path(&self.project_root, target);

        async move {
            tracing::debug!("Running {cmd:?}");
            let mut child = cmd.spawn().map_err(|e| BuildError::Spawn {
                command: "cargo build".to_string(),
                error: e.to_string(),
            })?;

            let status = child.wait().await.map_err(|e| BuildError::Spawn {
                command: "cargo build".to_string(),
                error: e.to_string(),
            })?;

            if !status.success() {
                return Err(match status.code() {
                    Some(code) => BuildError::Failed {
                        triple,
                        status: code,
                    },
                    None => BuildError::Terminated { triple },
                });
            }

            Ok(artifact)
        }
    }
}
