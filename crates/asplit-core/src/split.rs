//! Running a planned split: dry-run listing or dispatch through the pool.

use std::io::{self, Write};
use std::sync::Arc;

use crate::error::SplitError;
use crate::job::{JobFailure, SplitJob};
use crate::pool::{DispatchPool, FailureHook};
use crate::render::SegmentRenderer;
use crate::request::SplitRequest;

/// Result of one run. Individual failures do not make the run an error.
#[derive(Debug, Default)]
pub struct SplitSummary {
    pub planned: usize,
    pub succeeded: usize,
    pub failures: Vec<JobFailure>,
    pub dry_run: bool,
}

impl SplitSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Plans `request` and either prints the plan to `out` (dry run, renderer
/// never called, pool never started) or renders every part through a pool
/// of `request.threads` workers and waits for all of them.
pub fn run_split(
    request: &SplitRequest,
    renderer: Arc<dyn SegmentRenderer>,
    out: &mut dyn Write,
) -> Result<SplitSummary, SplitError> {
    run_split_reporting(request, renderer, out, None)
}

/// [`run_split`] that also hands each failure to `on_failure` while the
/// other parts are still rendering.
pub fn run_split_reporting(
    request: &SplitRequest,
    renderer: Arc<dyn SegmentRenderer>,
    out: &mut dyn Write,
    on_failure: Option<FailureHook>,
) -> Result<SplitSummary, SplitError> {
    let jobs = request.plan();
    let planned = jobs.len();
    tracing::info!(
        source = %request.source.display(),
        start = request.start,
        end = request.end,
        parts = planned,
        threads = request.threads,
        dry_run = request.dry_run,
        "planned split"
    );

    if request.dry_run {
        print_plan(&jobs, out).map_err(SplitError::PlanOutput)?;
        return Ok(SplitSummary {
            planned,
            dry_run: true,
            ..SplitSummary::default()
        });
    }

    let pool = DispatchPool::start_with_hook(request.threads, renderer, on_failure)?;
    for job in jobs {
        pool.submit(job);
    }
    let report = pool.wait_for_completion();
    pool.shutdown()?;

    let succeeded = report.succeeded();
    let failures = report.into_failures();
    tracing::info!(planned, succeeded, failed = failures.len(), "split finished");
    Ok(SplitSummary {
        planned,
        succeeded,
        failures,
        dry_run: false,
    })
}

fn print_plan(jobs: &[SplitJob], out: &mut dyn Write) -> io::Result<()> {
    for job in jobs {
        writeln!(out, "{}", job.plan_line())?;
    }
    out.flush()
}
