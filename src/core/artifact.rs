//! Artifact path conventions
//!
//! The toolchain places each produced binary at a location that is a pure
//! function of (project root, target triple, profile), and the collector
//! renames it to a released file name that is a pure function of
//! (project, triple). Keeping both as explicit functions (rather than
//! path literals scattered through the code) makes missing-artifact
//! errors diagnosable: the expected path can always be recomputed and
//! printed.

use std::path::{Path, PathBuf};

use crate::core::target::BuildTarget;

/// Source/destination pair for one collected artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMapping {
    /// Toolchain output location of the built binary
    pub source: PathBuf,
    /// File name under the output directory
    pub dest_name: String,
}

/// Toolchain output path for one build.
///
/// Cargo writes cross-compiled binaries to
/// `<project root>/target/<triple>/<profile dir>/<bin>[.exe]`.
pub fn expected_artifact_path(project_root: &Path, target: &BuildTarget) -> PathBuf {
    project_root
        .join("target")
        .join(target.triple.as_str())
        .join(target.profile_dir())
        .join(format!(
            "{}{}",
            target.project,
            target.triple.os().exe_suffix()
        ))
}

/// Compute the full mapping for one build target
pub fn mapping_for(project_root: &Path, target: &BuildTarget) -> ArtifactMapping {
    ArtifactMapping {
        source: expected_artifact_path(project_root, target),
        dest_name: target.triple.artifact_name(&target.project),
    }
}
