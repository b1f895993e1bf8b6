//! Fatal pre-flight errors. Any of these ends the run before a job is planned.

use std::path::PathBuf;

use thiserror::Error;

use crate::pool::PoolError;
use crate::probe::ProbeError;
use crate::timecode::TimecodeError;

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("file not found \"{}\"", .0.display())]
    MissingInput(PathBuf),

    #[error("invalid {which} time: {source}")]
    InvalidTime {
        which: &'static str,
        #[source]
        source: TimecodeError,
    },

    #[error("speedup factor must be greater than zero (got {0})")]
    NonPositiveSpeed(f64),

    #[error("part duration must be greater than zero (got {0} minutes)")]
    InvalidSegmentLength(f64),

    #[error("the number of worker threads must be at least 1")]
    NoWorkers,

    #[error("end time must be supplied: could not determine the length of \"{}\": {source}", .path.display())]
    UnknownEnd {
        path: PathBuf,
        #[source]
        source: ProbeError,
    },

    #[error("end time {end}s must be after start time {start}s")]
    EmptyRange { start: f64, end: f64 },

    #[error("numbering from {first} cannot cover {parts} part(s) without exceeding {}", u64::MAX)]
    NumberingOverflow { first: u64, parts: f64 },

    #[error("failed to create output directory \"{}\": {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write plan: {0}")]
    PlanOutput(#[source] std::io::Error),

    #[error(transparent)]
    Pool(#[from] PoolError),
}
