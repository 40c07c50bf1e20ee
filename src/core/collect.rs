//! Artifact collection
//!
//! After the full matrix has built, every produced binary is gathered
//! into one flat output directory under the released naming convention.
//! The directory is recreated on every collection, so collecting twice
//! over the same build outputs yields identical contents and a stale file
//! from an earlier run can never ship.
//!
//! A missing source file is recorded per mapping and collection moves on
//! to the remaining mappings: the builds already succeeded, so reporting
//! every path mismatch at once beats stopping at the first. Filesystem
//! failures (directory creation, copy) abort immediately.

use std::path::{Path, PathBuf};

use crate::core::artifact;
use crate::core::checksum;
use crate::core::target::BuildTarget;
use crate::error::{CollectError, FilesystemError};
use crate::infra::filesystem;

/// Collection options
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Write a SHA256SUMS file after a complete collection
    pub checksums: bool,
}

/// One successfully collected artifact
#[derive(Debug, Clone)]
pub struct CollectedArtifact {
    /// Target triple the artifact was built for
    pub triple: String,
    /// Toolchain output location it was copied from
    pub source: PathBuf,
    /// Destination under the output directory
    pub dest: PathBuf,
    /// Size in bytes
    pub size: u64,
}

/// Result of one collection pass
#[derive(Debug, Default)]
pub struct CollectReport {
    /// Artifacts copied into the output directory, in matrix order
    pub collected: Vec<CollectedArtifact>,
    /// Mappings whose source was absent
    pub missing: Vec<CollectError>,
    /// Path of the checksum manifest, when one was written
    pub checksum_file: Option<PathBuf>,
}

impl CollectReport {
    /// True iff every mapping was collected
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Collect every matrix artifact into `dist_dir`.
///
/// Precondition: every entry in `matrix` built successfully. Running the
/// collector over a partially built matrix is a caller bug; the absent
/// binaries would all surface as `MissingArtifact`.
pub fn collect_artifacts(
    project_root: &Path,
    matrix: &[BuildTarget],
    dist_dir: &Path,
    options: &CollectOptions,
) -> Result<CollectReport, FilesystemError> {
    filesystem::remove_dir_all(dist_dir)?;
    filesystem::create_dir_all(dist_dir)?;

    let mut report = CollectReport::default();

    for target in matrix {
        let mapping = artifact::mapping_for(project_root, target);

        if !mapping.source.is_file() {
            tracing::warn!(
                "No artifact for {} at {}",
                target.triple,
                mapping.source.display()
            );
            report.missing.push(CollectError::MissingArtifact {
                triple: target.triple.as_str().to_string(),
                path: mapping.source,
            });
            continue;
        }

        let dest = dist_dir.join(&mapping.dest_name);
        let size =
            std::fs::copy(&mapping.source, &dest).map_err(|e| FilesystemError::CopyFile {
                src_path: mapping.source.clone(),
                dest: dest.clone(),
                error: e.to_string(),
            })?;

        tracing::debug!(
            "Collected {} -> {}",
            mapping.source.display(),
            dest.display()
        );
        report.collected.push(CollectedArtifact {
            triple: target.triple.as_str().to_string(),
            source: mapping.source,
            dest,
            size,
        });
    }

    if options.checksums && report.is_complete() {
        let names: Vec<String> = report
            .collected
            .iter()
            .filter_map(|a| a.dest.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();
        report.checksum_file = Some(checksum::write_checksums(dist_dir, &names)?);
    }

    Ok(report)
}
