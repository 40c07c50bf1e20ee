//! Build matrix runner
//!
//! Executes one build invocation per matrix entry, in manifest order.
//! Builds run sequentially by default; a bounded worker pool is available
//! because matrix entries share no mutable state. Under the default
//! fail-fast policy the first failure stops all further scheduling; with
//! keep-going the whole matrix runs and failures are aggregated.
//!
//! No retries happen at this layer. A transient toolchain failure is
//! surfaced to the caller; retry policy belongs to the surrounding CI.

use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};

use crate::core::target::BuildTarget;
use crate::error::BuildError;

/// The external build capability.
///
/// Contract: on success, a binary exists at the returned toolchain-defined
/// path; on failure, any partial output must not be trusted.
pub trait BuildCapability {
    /// Build the project for one target
    fn build(&self, target: &BuildTarget) -> impl Future<Output = Result<PathBuf, BuildError>>;
}

/// Runner options
#[derive(Debug, Clone)]
pub struct RunnerOptions {
    /// Number of builds in flight at once (1 = sequential)
    pub jobs: usize,
    /// Run every entry and aggregate failures instead of failing fast
    pub keep_going: bool,
    /// Per-build timeout; elapse counts as build failure
    pub timeout: Option<Duration>,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            keep_going: false,
            timeout: None,
        }
    }
}

impl RunnerOptions {
    /// Clamp the job count to something the machine can sustain.
    /// Cross-compilation is memory and CPU heavy; more jobs than cores
    /// only adds thrash.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.clamp(1, num_cpus::get().max(1))
    }
}

/// Outcome of one matrix entry
#[derive(Debug)]
pub enum BuildOutcome {
    /// Build succeeded; the binary exists at this path
    Built { artifact: PathBuf },
    /// Build was invoked and failed
    Failed { error: BuildError },
    /// Build was never invoked because an earlier entry failed
    Skipped,
}

/// Result of one matrix entry, in matrix order
#[derive(Debug)]
pub struct BuildRecord {
    /// The matrix entry
    pub target: BuildTarget,
    /// What happened
    pub outcome: BuildOutcome,
    /// Wall-clock time of the invocation (zero for skipped entries)
    pub duration: Duration,
}

impl BuildRecord {
    /// Whether this entry produced a trusted artifact
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, BuildOutcome::Built { .. })
    }
}

/// Report over the whole matrix run
#[derive(Debug)]
pub struct RunReport {
    /// One record per matrix entry, in matrix order
    pub records: Vec<BuildRecord>,
}

impl RunReport {
    /// True iff every entry was built successfully.
    ///
    /// Collection must not start unless this holds: a partial matrix
    /// would ship a mismatched release set.
    pub fn all_built(&self) -> bool {
        self.records.iter().all(BuildRecord::succeeded)
    }

    /// Number of successful builds
    pub fn built_count(&self) -> usize {
        self.records.iter().filter(|r| r.succeeded()).count()
    }

    /// Number of failed builds
    pub fn failed_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, BuildOutcome::Failed { .. }))
            .count()
    }

    /// Number of entries never attempted
    pub fn skipped_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, BuildOutcome::Skipped))
            .count()
    }
}

/// Run the build matrix.
///
/// `on_record` is called once per finished entry, in completion order,
/// for progress reporting. The returned report is in matrix order and
/// covers every entry, including those skipped by fail-fast.
pub async fn run_matrix<B, F>(
    capability: &B,
    matrix: &[BuildTarget],
    options: &RunnerOptions,
    mut on_record: F,
) -> RunReport
where
    B: BuildCapability,
    F: FnMut(&BuildRecord),
{
    let jobs = options.effective_jobs();
    if jobs <= 1 {
        run_sequential(capability, matrix, options, &mut on_record).await
    } else {
        run_pooled(capability, matrix, options, jobs, &mut on_record).await
    }
}

/// Invoke the capability for one target, bounded by the timeout.
///
/// On elapse the capability's in-flight future is dropped; the cargo
/// invocation behind it is spawned kill-on-drop, so no orphaned build
/// survives the timeout.
async fn invoke<B: BuildCapability>(
    capability: &B,
    target: &BuildTarget,
    timeout: Option<Duration>,
) -> Result<PathBuf, BuildError> {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, capability.build(target)).await {
            Ok(result) => result,
            Err(_) => Err(BuildError::Timeout {
                triple: target.triple.as_str().to_string(),
                secs: limit.as_secs(),
            }),
        },
        None => capability.build(target).await,
    }
}

async fn run_sequential<B, F>(
    capability: &B,
    matrix: &[BuildTarget],
    options: &RunnerOptions,
    on_record: &mut F,
) -> RunReport
where
    B: BuildCapability,
    F: FnMut(&BuildRecord),
{
    let mut records = Vec::with_capacity(matrix.len());
    let mut aborted = false;

    for target in matrix {
        if aborted {
            let record = BuildRecord {
                target: target.clone(),
                outcome: BuildOutcome::Skipped,
                duration: Duration::ZERO,
            };
            on_record(&record);
            records.push(record);
            continue;
        }

        tracing::info!("Building {} for {}", target.project, target.triple);
        let started = Instant::now();
        let outcome = match invoke(capability, target, options.timeout).await {
            Ok(artifact) => BuildOutcome::Built { artifact },
            Err(error) => {
                if !options.keep_going {
                    aborted = true;
                }
                BuildOutcome::Failed { error }
            }
        };

        let record = BuildRecord {
            target: target.clone(),
            outcome,
            duration: started.elapsed(),
        };
        on_record(&record);
        records.push(record);
    }

    RunReport { records }
}

/// Bounded worker pool over the matrix.
///
/// Entries are side-effect-isolated (each build writes only its own
/// `target/<triple>/` subtree), so no locking is needed. With fail-fast,
/// a failure stops further scheduling but in-flight builds run to
/// completion: their cost is already sunk and partial results are
/// informative.
async fn run_pooled<B, F>(
    capability: &B,
    matrix: &[BuildTarget],
    options: &RunnerOptions,
    jobs: usize,
    on_record: &mut F,
) -> RunReport
where
    B: BuildCapability,
    F: FnMut(&BuildRecord),
{
    let abort = AtomicBool::new(false);

    let mut pending = stream::iter(matrix.iter().cloned().enumerate().map(|(index, target)| {
        let abort = &abort;
        async move {
            if abort.load(Ordering::SeqCst) {
                return (
                    index,
                    BuildRecord {
                        target,
                        outcome: BuildOutcome::Skipped,
                        duration: Duration::ZERO,
                    },
                );
            }

            tracing::info!("Building {} for {}", target.project, target.triple);
            let started = Instant::now();
            let outcome = match invoke(capability, &target, options.timeout).await {
                Ok(artifact) => BuildOutcome::Built { artifact },
                Err(error) => {
                    if !options.keep_going {
                        abort.store(true, Ordering::SeqCst);
                    }
                    BuildOutcome::Failed { error }
                }
            };
            let duration = started.elapsed();
            (
                index,
                BuildRecord {
                    target,
                    outcome,
                    duration,
                },
            )
        }
    }))
    .buffer_unordered(jobs);

    let mut indexed = Vec::with_capacity(matrix.len());
    while let Some((index, record)) = pending.next().await {
        on_record(&record);
        indexed.push((index, record));
    }

    indexed.sort_by_key(|(index, _)| *index);
    RunReport {
        records: indexed.into_iter().map(|(_, record)| record).collect(),
    }
}
