//! Clean logic
//!
//! Removes the collected-artifact output directory. The toolchain's own
//! `target/` tree is left alone; it belongs to the external build
//! capability, not to the orchestrator.

use std::path::{Path, PathBuf};

use crate::error::FilesystemError;

/// Result of clean operation
#[derive(Debug)]
pub struct CleanResult {
    /// The directory that was targeted
    pub path: PathBuf,
    /// Whether it existed and was removed
    pub removed: bool,
}

/// Remove the output directory if it exists
pub fn clean_project(project_dir: &Path, dist_dir: &str) -> Result<CleanResult, FilesystemError> {
    let path = project_dir.join(dist_dir);

    if path.exists() {
        std::fs::remove_dir_all(&path).map_err(|e| FilesystemError::RemoveDir {
            path: path.clone(),
            error: e.to_string(),
        })?;
        Ok(CleanResult {
            path,
            removed: true,
        })
    } else {
        Ok(CleanResult {
            path,
            removed: false,
        })
    }
}

/// Check whether a project has collected artifacts
pub fn has_artifacts(project_dir: &Path, dist_dir: &str) -> bool {
    project_dir.join(dist_dir).exists()
}
