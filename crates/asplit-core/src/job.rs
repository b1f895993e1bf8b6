//! Render jobs: a planned segment bound to concrete render parameters.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::render::RenderError;
use crate::segmenter::{OutputNaming, Segment};

/// One unit of work for the dispatch pool. Carries everything a worker needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitJob {
    pub source: PathBuf,
    pub segment: Segment,
    pub speed: f64,
    pub output_path: PathBuf,
}

impl SplitJob {
    pub fn new(source: &Path, segment: Segment, speed: f64, naming: &OutputNaming) -> Self {
        Self {
            source: source.to_path_buf(),
            segment,
            speed,
            output_path: naming.path_for(segment.sequence),
        }
    }

    /// Line shown for a dry run: `<path> [HH:MM:SS-HH:MM:SS]`.
    pub fn plan_line(&self) -> String {
        format!("{} {}", self.output_path.display(), self.segment.range_label())
    }
}

/// Builds one job per segment, preserving plan order.
pub fn jobs_for_plan(
    source: &Path,
    segments: &[Segment],
    speed: f64,
    naming: &OutputNaming,
) -> Vec<SplitJob> {
    segments
        .iter()
        .map(|segment| SplitJob::new(source, *segment, speed, naming))
        .collect()
}

/// A job whose render did not succeed.
#[derive(Debug)]
pub struct JobFailure {
    pub job: SplitJob,
    pub error: RenderError,
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error splitting part #{} {} into {}: {}",
            self.job.segment.sequence,
            self.job.segment.range_label(),
            self.job.output_path.display(),
            self.error
        )
    }
}

/// Terminal state of one job.
#[derive(Debug)]
pub struct JobOutcome {
    pub job: SplitJob,
    pub result: Result<(), RenderError>,
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Converts a failed outcome into a [`JobFailure`]; `None` on success.
    pub fn into_failure(self) -> Option<JobFailure> {
        match self.result {
            Ok(()) => None,
            Err(error) => Some(JobFailure {
                job: self.job,
                error,
            }),
        }
    }
}

impl From<JobFailure> for JobOutcome {
    fn from(failure: JobFailure) -> Self {
        Self {
            job: failure.job,
            result: Err(failure.error),
        }
    }
}
