//! Concurrent validation runner
//!
//! Every selected check runs against one target on a bounded worker pool.
//! A check that panics or whose task dies produces a failed result for that
//! check only; the rest of the run is unaffected. Results come back sorted
//! by check name regardless of completion order.

use futures::FutureExt;
use seaseq_core::{CheckExecutor, CheckOutcome, CheckResult, ValidationTarget};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use crate::executor::panic_message;

/// Upper bound on concurrently running checks
pub const MAX_WORKERS: usize = 8;

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// One entry per requested check, sorted by name
    pub results: Vec<CheckResult>,
    /// Wall-clock time of the whole run
    pub total_duration: Duration,
}

impl RunReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.ok).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_duration.as_secs_f64()
    }
}

/// Runs named checks through an executor with bounded parallelism
#[derive(Debug, Clone)]
pub struct ValidationRunner {
    max_workers: usize,
}

impl ValidationRunner {
    pub fn new() -> Self {
        Self {
            max_workers: MAX_WORKERS,
        }
    }

    /// Override the worker cap, kept within `1..=MAX_WORKERS`
    pub fn with_max_workers(max_workers: usize) -> Self {
        Self {
            max_workers: max_workers.clamp(1, MAX_WORKERS),
        }
    }

    /// Pool size for a run of `n` checks
    pub fn worker_count(&self, n: usize) -> usize {
        self.max_workers.min(n.max(1))
    }

    /// Run every named check against the target
    pub async fn run(
        &self,
        executor: Arc<dyn CheckExecutor>,
        target: &ValidationTarget,
        names: &[String],
    ) -> RunReport {
        let started = Instant::now();
        let workers = self.worker_count(names.len());
        debug!(
            "Running {} checks against {} with {} workers",
            names.len(),
            target,
            workers
        );

        let semaphore = Arc::new(Semaphore::new(workers));
        let mut handles = Vec::with_capacity(names.len());

        for name in names {
            let semaphore = semaphore.clone();
            let executor = executor.clone();
            let target = target.clone();
            let task_name = name.clone();

            let handle = tokio::spawn(async move {
                let name = task_name;
                let _permit = semaphore.acquire_owned().await.ok();
                let check_started = Instant::now();
                let outcome = AssertUnwindSafe(executor.run_check(&name, &target))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|payload| {
                        let message = panic_message(payload.as_ref());
                        warn!("Check '{}' panicked: {}", name, message);
                        CheckOutcome::fail(format!("Check '{}' crashed: {}", name, message))
                    });
                CheckResult::new(name, outcome, check_started.elapsed())
            });

            handles.push((name.clone(), Instant::now(), handle));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (name, spawned, handle) in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Check task '{}' failed: {}", name, e);
                    results.push(CheckResult::new(
                        name,
                        CheckOutcome::fail(format!("Check task failed: {}", e)),
                        spawned.elapsed(),
                    ));
                }
            }
        }

        results.sort_by(|a, b| a.name.cmp(&b.name));

        let report = RunReport {
            results,
            total_duration: started.elapsed(),
        };
        info!(
            "Completed {} checks in {:.2}s ({} passed, {} failed)",
            report.results.len(),
            report.total_seconds(),
            report.passed(),
            report.failed()
        );
        report
    }
}

impl Default for ValidationRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Run checks with the default worker cap
pub async fn run_checks(
    executor: Arc<dyn CheckExecutor>,
    target: &ValidationTarget,
    names: &[String],
) -> RunReport {
    ValidationRunner::new().run(executor, target, names).await
}
