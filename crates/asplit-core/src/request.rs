//! Turning raw user options into a validated [`SplitRequest`].
//!
//! All fatal checks happen here, before anything is planned or dispatched.

use std::fs;
use std::path::PathBuf;

use crate::error::SplitError;
use crate::job::{jobs_for_plan, SplitJob};
use crate::probe::{DurationProbe, ProbeError};
use crate::segmenter::{last_sequence, plan_segments, OutputNaming};
use crate::timecode::parse_timecode;

/// Options as the user gave them; times are still unparsed strings.
#[derive(Debug, Clone)]
pub struct SplitOptions {
    pub source: PathBuf,
    pub start: Option<String>,
    pub end: Option<String>,
    pub speed: f64,
    pub segment_minutes: f64,
    pub output_dir: Option<PathBuf>,
    pub format: String,
    pub prefix: Option<String>,
    pub numbering_start: u64,
    pub threads: usize,
    pub dry_run: bool,
}

/// A fully validated split run: `start < end`, positive speed and segment
/// length, at least one worker.
#[derive(Debug, Clone)]
pub struct SplitRequest {
    pub source: PathBuf,
    pub start: f64,
    pub end: f64,
    pub speed: f64,
    pub segment_secs: f64,
    pub numbering_start: u64,
    pub naming: OutputNaming,
    pub threads: usize,
    pub dry_run: bool,
}

impl SplitOptions {
    /// Validates the options, asking `probe` for the file length when no
    /// end time was given. Creates the output directory unless dry-running.
    pub fn resolve(&self, probe: &dyn DurationProbe) -> Result<SplitRequest, SplitError> {
        if !self.source.is_file() {
            return Err(SplitError::MissingInput(self.source.clone()));
        }

        let start = match &self.start {
            Some(s) => parse_timecode(s)
                .map_err(|source| SplitError::InvalidTime {
                    which: "start",
                    source,
                })? as f64,
            None => 0.0,
        };

        let end = match &self.end {
            Some(s) => parse_timecode(s)
                .map_err(|source| SplitError::InvalidTime {
                    which: "end",
                    source,
                })? as f64,
            None => probe_end(probe, &self.source)?,
        };

        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(SplitError::NonPositiveSpeed(self.speed));
        }
        if self.threads < 1 {
            return Err(SplitError::NoWorkers);
        }
        if !(self.segment_minutes.is_finite() && self.segment_minutes > 0.0) {
            return Err(SplitError::InvalidSegmentLength(self.segment_minutes));
        }
        if start >= end {
            return Err(SplitError::EmptyRange { start, end });
        }
        let segment_secs = self.segment_minutes * 60.0;
        if last_sequence(start, end, segment_secs, self.numbering_start).is_none() {
            return Err(SplitError::NumberingOverflow {
                first: self.numbering_start,
                parts: ((end - start) / segment_secs).ceil(),
            });
        }

        let output_dir = self.output_dir.clone().unwrap_or_default();
        if !self.dry_run && !output_dir.as_os_str().is_empty() && !output_dir.is_dir() {
            fs::create_dir_all(&output_dir).map_err(|source| SplitError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;
            tracing::info!("created output directory {}", output_dir.display());
        }

        let naming = OutputNaming::for_source(
            output_dir,
            self.prefix.as_deref(),
            &self.source,
            self.format.clone(),
        );

        Ok(SplitRequest {
            source: self.source.clone(),
            start,
            end,
            speed: self.speed,
            segment_secs,
            numbering_start: self.numbering_start,
            naming,
            threads: self.threads,
            dry_run: self.dry_run,
        })
    }
}

fn probe_end(probe: &dyn DurationProbe, source: &std::path::Path) -> Result<f64, SplitError> {
    probe.duration_secs(source).map_err(|err| {
        if let ProbeError::NotInstalled { program } = &err {
            tracing::warn!("{} not found", program);
        }
        SplitError::UnknownEnd {
            path: source.to_path_buf(),
            source: err,
        }
    })
}

impl SplitRequest {
    /// Plans the run: one job per segment, in sequence order.
    pub fn plan(&self) -> Vec<SplitJob> {
        let segments = plan_segments(self.start, self.end, self.segment_secs, self.numbering_start);
        jobs_for_plan(&self.source, &segments, self.speed, &self.naming)
    }
}
