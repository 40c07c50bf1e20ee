//! Build command implementation
//!
//! Implements `relforge build`: run every matrix entry through the
//! external build capability, then hand the completed matrix to the
//! collector. Collection never starts unless every scheduled build
//! succeeded; shipping a partial release set is worse than shipping
//! nothing.

use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::cli::output::{self, status};
use crate::config::defaults;
use crate::core::collect::{self, CollectOptions};
use crate::core::manifest::Manifest;
use crate::core::runner::{self, BuildOutcome, RunReport, RunnerOptions};
use crate::core::target::BuildTarget;
use crate::infra::cargo::CargoBuilder;

/// Build options
#[derive(Debug, Default)]
pub struct BuildOptions {
    /// Restrict the run to these triples (empty = whole matrix)
    pub targets: Vec<String>,
    /// Number of concurrent builds
    pub jobs: Option<usize>,
    /// Keep building after a failure
    pub keep_going: bool,
    /// Per-build timeout in seconds
    pub timeout: Option<u64>,
    /// Skip the collection phase
    pub no_collect: bool,
    /// Write SHA256SUMS after collection
    pub checksums: bool,
}

/// Execute the build command
pub async fn execute(project_dir: &Path, options: BuildOptions, quiet: bool) -> Result<()> {
    let manifest = Manifest::load(project_dir)?;
    let full_matrix = manifest.matrix().context("Invalid build matrix")?;

    let matrix = select_targets(&full_matrix, &options.targets)?;
    if matrix.is_empty() {
        bail!("Build matrix is empty; add [[target]] entries to relforge.toml");
    }

    let runner_options = RunnerOptions {
        jobs: options
            .jobs
            .or(manifest.build.jobs)
            .unwrap_or(defaults::DEFAULT_BUILD_JOBS),
        keep_going: options.keep_going || manifest.build.keep_going,
        timeout: options
            .timeout
            .or(manifest.build.timeout_secs)
            .map(Duration::from_secs),
    };

    let project_root = project_dir.join(&manifest.project.path);
    let builder = CargoBuilder::new(&project_root).with_locked(manifest.build.locked);

    tracing::info!(
        "Building {} for {} targets with {} jobs",
        manifest.project.name,
        matrix.len(),
        runner_options.effective_jobs()
    );

    let bar = output::create_matrix_bar(matrix.len() as u64, quiet);
    let report = runner::run_matrix(&builder, &matrix, &runner_options, |record| {
        bar.set_message(record.target.triple.as_str().to_string());
        bar.inc(1);
    })
    .await;
    bar.finish_and_clear();

    print_build_summary(&report, quiet);

    if !report.all_built() {
        bail!(
            "{} of {} builds failed ({} skipped)",
            report.failed_count(),
            report.records.len(),
            report.skipped_count()
        );
    }

    if options.no_collect {
        if !quiet {
            println!(
                "{} Built {} targets (collection skipped)",
                status::SUCCESS,
                report.built_count()
            );
        }
        return Ok(());
    }

    let dist_dir = project_dir.join(&manifest.build.dist_dir);
    let collect_options = CollectOptions {
        checksums: options.checksums || manifest.build.checksums,
    };
    let collected =
        collect::collect_artifacts(&project_root, &matrix, &dist_dir, &collect_options)?;

    for missing in &collected.missing {
        eprintln!("{} {missing}", status::ERROR);
    }
    if !collected.is_complete() {
        bail!(
            "{} of {} artifacts missing after a successful build; \
             the toolchain's output convention may have changed",
            collected.missing.len(),
            matrix.len()
        );
    }

    if !quiet {
        println!(
            "{} Release complete: {} artifacts in {}",
            status::SUCCESS,
            collected.collected.len(),
            dist_dir.display()
        );
        if let Some(sums) = &collected.checksum_file {
            println!("  Checksums: {}", sums.display());
        }
    }

    Ok(())
}

/// Filter the matrix to the requested triples, keeping matrix order.
///
/// Requesting a triple that is not part of the matrix is an error: a
/// typo must not silently shrink a release.
fn select_targets(matrix: &[BuildTarget], requested: &[String]) -> Result<Vec<BuildTarget>> {
    if requested.is_empty() {
        return Ok(matrix.to_vec());
    }

    for triple in requested {
        if !matrix.iter().any(|t| t.triple.as_str() == triple) {
            bail!("Target '{triple}' is not in the build matrix; see 'relforge list'");
        }
    }

    Ok(matrix
        .iter()
        .filter(|t| requested.iter().any(|r| r == t.triple.as_str()))
        .cloned()
        .collect())
}

/// Print one line per matrix entry: what succeeded, failed, or never ran
fn print_build_summary(report: &RunReport, quiet: bool) {
    for record in &report.records {
        match &record.outcome {
            BuildOutcome::Built { .. } => {
                if !quiet {
                    println!(
                        "{} {} ({:.1}s)",
                        status::SUCCESS,
                        record.target.triple,
                        record.duration.as_secs_f64()
                    );
                }
            }
            BuildOutcome::Failed { error } => {
                eprintln!("{} {}: {error}", status::ERROR, record.target.triple);
            }
            BuildOutcome::Skipped => {
                eprintln!(
                    "{} {}: skipped after earlier failure",
                    status::SKIPPED,
                    record.target.triple
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::target::TargetTriple;

    fn matrix_of(triples: &[&str]) -> Vec<BuildTarget> {
        triples
            .iter()
            .map(|t| BuildTarget::new("proj", TargetTriple::parse(t).unwrap(), "release"))
            .collect()
    }

    #[test]
    fn test_select_targets_empty_keeps_whole_matrix() {
        let matrix = matrix_of(&["x86_64-unknown-linux-musl", "x86_64-pc-windows-gnu"]);
        let selected = select_targets(&matrix, &[]).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_select_targets_filters_in_matrix_order() {
        let matrix = matrix_of(&[
            "x86_64-unknown-linux-musl",
            "x86_64-pc-windows-gnu",
            "aarch64-apple-darwin",
        ]);
        let requested = vec![
            "aarch64-apple-darwin".to_string(),
            "x86_64-unknown-linux-musl".to_string(),
        ];
        let selected = select_targets(&matrix, &requested).unwrap();
        let order: Vec<&str> = selected.iter().map(|t| t.triple.as_str()).collect();
        assert_eq!(
            order,
            vec!["x86_64-unknown-linux-musl", "aarch64-apple-darwin"]
        );
    }

    #[test]
    fn test_select_targets_rejects_unknown_triple() {
        let matrix = matrix_of(&["x86_64-unknown-linux-musl"]);
        let requested = vec!["x86_64-pc-windows-gnu".to_string()];
        assert!(select_targets(&matrix, &requested).is_err());
    }
}
