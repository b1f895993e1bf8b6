//! Bounded dispatch pool: N worker threads render jobs from a shared queue.
//!
//! Workers block on the queue, run the renderer synchronously and record
//! each job's outcome whether it succeeded or not. A failed job never stops
//! the pool or its siblings. [`DispatchPool::wait_for_completion`] blocks
//! until every submitted job is terminal; [`DispatchPool::shutdown`] closes
//! the queue and joins the workers.
//!
//! An optional [`FailureHook`] sees each failure on the worker thread as soon
//! as it happens, before it is recorded.

mod queue;
mod tracker;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;

use thiserror::Error;

use crate::job::{JobFailure, JobOutcome, SplitJob};
use crate::render::{RenderError, SegmentRenderer};

use queue::JobQueue;
use tracker::CompletionTracker;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("the number of worker threads must be at least 1")]
    NoWorkers,

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("{0} worker thread(s) panicked")]
    WorkerPanicked(usize),
}

/// Outcomes of the jobs that finished since the previous wait.
#[derive(Debug, Default)]
pub struct PoolReport {
    pub outcomes: Vec<JobOutcome>,
}

impl PoolReport {
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.len() - self.succeeded()
    }

    /// Failures ordered by segment sequence (completion order is arbitrary).
    pub fn into_failures(self) -> Vec<JobFailure> {
        let mut failures: Vec<JobFailure> = self
            .outcomes
            .into_iter()
            .filter_map(JobOutcome::into_failure)
            .collect();
        failures.sort_by_key(|f| f.job.segment.sequence);
        failures
    }
}

/// Called on a worker thread for every failed job.
pub type FailureHook = Arc<dyn Fn(&JobFailure) + Send + Sync>;

struct Shared {
    queue: JobQueue,
    tracker: CompletionTracker,
    renderer: Arc<dyn SegmentRenderer>,
    on_failure: Option<FailureHook>,
}

/// Fixed-size worker pool. Dropping it closes the queue, lets the workers
/// drain what is left and joins them.
pub struct DispatchPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
}

impl DispatchPool {
    /// Spawns `worker_count` workers that render jobs with `renderer`.
    pub fn start(
        worker_count: usize,
        renderer: Arc<dyn SegmentRenderer>,
    ) -> Result<Self, PoolError> {
        Self::start_with_hook(worker_count, renderer, None)
    }

    /// Like [`DispatchPool::start`], also passing each failure to `on_failure`.
    pub fn start_with_hook(
        worker_count: usize,
        renderer: Arc<dyn SegmentRenderer>,
        on_failure: Option<FailureHook>,
    ) -> Result<Self, PoolError> {
        if worker_count == 0 {
            return Err(PoolError::NoWorkers);
        }
        let shared = Arc::new(Shared {
            queue: JobQueue::new(),
            tracker: CompletionTracker::new(),
            renderer,
            on_failure,
        });
        let mut pool = Self {
            shared,
            workers: Vec::with_capacity(worker_count),
        };
        for index in 0..worker_count {
            let shared = Arc::clone(&pool.shared);
            let handle = std::thread::Builder::new()
                .name(format!("asplit-worker-{index}"))
                .spawn(move || worker_loop(&shared))
                .map_err(PoolError::Spawn)?;
            pool.workers.push(handle);
        }
        tracing::debug!(workers = worker_count, "dispatch pool started");
        Ok(pool)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Enqueues one job. Jobs are taken in submission order; completion
    /// order depends on which worker finishes first.
    pub fn submit(&self, job: SplitJob) {
        self.shared.tracker.add();
        if !self.shared.queue.push(job) {
            // Unreachable while `self` is alive: only shutdown/drop close the queue.
            self.shared.tracker.cancel();
        }
    }

    /// Number of jobs queued or running.
    pub fn pending(&self) -> usize {
        self.shared.tracker.outstanding()
    }

    /// Blocks until every job submitted so far has succeeded or failed.
    pub fn wait_for_completion(&self) -> PoolReport {
        PoolReport {
            outcomes: self.shared.tracker.wait(),
        }
    }

    /// Stops accepting work and joins the workers once the queue is drained.
    pub fn shutdown(mut self) -> Result<(), PoolError> {
        self.close_and_join()
    }

    fn close_and_join(&mut self) -> Result<(), PoolError> {
        self.shared.queue.close();
        let panicked = self
            .workers
            .drain(..)
            .map(JoinHandle::join)
            .filter(Result::is_err)
            .count();
        if panicked > 0 {
            return Err(PoolError::WorkerPanicked(panicked));
        }
        Ok(())
    }
}

impl Drop for DispatchPool {
    fn drop(&mut self) {
        if let Err(e) = self.close_and_join() {
            tracing::warn!("dispatch pool shutdown: {}", e);
        }
    }
}

fn worker_loop(shared: &Shared) {
    while let Some(job) = shared.queue.pop() {
        let outcome = match render_caught(shared.renderer.as_ref(), &job) {
            Ok(()) => {
                tracing::debug!(
                    sequence = job.segment.sequence,
                    output = %job.output_path.display(),
                    "segment done"
                );
                JobOutcome { job, result: Ok(()) }
            }
            Err(error) => {
                let failure = JobFailure { job, error };
                tracing::warn!(
                    sequence = failure.job.segment.sequence,
                    start = failure.job.segment.start,
                    end = failure.job.segment.end,
                    output = %failure.job.output_path.display(),
                    "segment failed: {}",
                    failure.error
                );
                if let Some(hook) = &shared.on_failure {
                    report_caught(hook.as_ref(), &failure);
                }
                JobOutcome::from(failure)
            }
        };
        shared.tracker.complete(outcome);
    }
}

/// A panicking hook must not keep the job from being recorded.
fn report_caught(hook: &(dyn Fn(&JobFailure) + Send + Sync), failure: &JobFailure) {
    if panic::catch_unwind(AssertUnwindSafe(|| hook(failure))).is_err() {
        tracing::warn!(
            sequence = failure.job.segment.sequence,
            "failure hook panicked"
        );
    }
}

/// Runs the renderer, turning a panic into a job failure so the job is
/// still counted as complete.
fn render_caught(renderer: &dyn SegmentRenderer, job: &SplitJob) -> Result<(), RenderError> {
    match panic::catch_unwind(AssertUnwindSafe(|| renderer.render(job))) {
        Ok(result) => result,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(RenderError::Panicked(msg))
        }
    }
}
