//! Worker pool dispatch and per-job failure aggregation

use crate::collection::design::RenderJob;
use crate::io::error::{BuildError, Result};
use crate::io::progress::RenderProgress;
use crate::render::compositor::{self, RenderOptions};
use std::sync::mpsc;

/// Outcome of one dispatch run after every job has been attempted
#[derive(Debug, Default)]
pub struct DispatchReport {
    /// Number of jobs that wrote their output file
    pub succeeded: usize,
    /// Failed jobs with the error that stopped each one
    pub failures: Vec<JobFailure>,
}

impl DispatchReport {
    /// Whether every attempted job succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of attempted jobs
    pub fn total(&self) -> usize {
        self.succeeded + self.failures.len()
    }
}

/// A single failed job, identified for the aggregate report
#[derive(Debug)]
pub struct JobFailure {
    /// Unique index of the failed job
    pub unique_index: String,
    /// Error that stopped the job
    pub error: BuildError,
}

/// Run every job over a pool of exactly `pool_size` workers
///
/// Jobs complete in unspecified order and carry no ordering dependency on
/// each other. A failing job never aborts its siblings; failures are
/// collected and returned once all jobs have been attempted. Progress, when
/// provided, advances as jobs complete.
///
/// # Errors
///
/// Returns an error only when the worker pool itself cannot be built.
/// Per-job failures are carried in the `DispatchReport`.
pub fn dispatch(
    jobs: Vec<RenderJob>,
    options: &RenderOptions,
    pool_size: usize,
    progress: Option<&RenderProgress>,
) -> Result<DispatchReport> {
    let pool = build_worker_pool(pool_size)?;
    let (sender, receiver) = mpsc::channel();

    for job in jobs {
        let sender = sender.clone();
        let options = options.clone();
        pool.spawn(move || {
            let result = compositor::render(&job, &options).map(|_| ());
            // The coordinator drains the channel until every worker clone drops
            let _ = sender.send((job.unique_index, result));
        });
    }
    drop(sender);

    let mut report = DispatchReport::default();
    for (unique_index, result) in receiver {
        match result {
            Ok(()) => report.succeeded += 1,
            Err(error) => report.failures.push(JobFailure {
                unique_index,
                error,
            }),
        }
        if let Some(progress) = progress {
            progress.job_completed();
        }
    }

    Ok(report)
}

fn build_worker_pool(pool_size: usize) -> Result<rayon::ThreadPool> {
    if pool_size == 0 {
        return Err(BuildError::PoolBuild {
            reason: "pool size must be at least 1".to_string(),
        });
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(pool_size)
        .build()
        .map_err(|e| BuildError::PoolBuild {
            reason: e.to_string(),
        })
}
