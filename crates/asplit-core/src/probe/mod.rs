//! Duration probing: asking an external tool how long a recording is.

mod mediainfo;

use std::path::Path;

use thiserror::Error;

pub use mediainfo::{parse_mediainfo_duration, MediainfoProbe};

/// Why the duration of a file is unavailable. Only fatal when the caller
/// has no explicit end time to fall back on.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("{program} not found")]
    NotInstalled { program: String },

    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with status {code:?}")]
    Failed { program: String, code: Option<i32> },

    #[error("unrecognised duration output {0:?}")]
    Unparseable(String),

    #[error("duration unavailable")]
    Unavailable,
}

/// Reports the total playable length of a media file in seconds.
pub trait DurationProbe {
    fn duration_secs(&self, path: &Path) -> Result<f64, ProbeError>;
}

/// Probe that always reports the same duration (or always fails). Handy
/// when the length is already known.
#[derive(Debug, Clone, Copy)]
pub struct FixedDuration(pub Option<f64>);

impl DurationProbe for FixedDuration {
    fn duration_secs(&self, _path: &Path) -> Result<f64, ProbeError> {
        self.0.ok_or(ProbeError::Unavailable)
    }
}
