//! Segment rendering: extracting one time range of the source into a file.
//!
//! The pool only depends on [`SegmentRenderer`]; [`PlayerRenderer`] is the
//! production implementation that drives an external media player.

mod player;

use thiserror::Error;

use crate::job::SplitJob;

pub use player::{player_args, PlayerRenderer};

/// Why a single segment could not be rendered. Never retried.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The player could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The player ran but reported failure. `code` is `None` when killed by a signal.
    #[error("{program} exited with {}", exit_label(.code))]
    Failed { program: String, code: Option<i32> },

    /// The renderer panicked; the worker caught it and kept going.
    #[error("renderer panicked: {0}")]
    Panicked(String),
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Performs the extraction for one job. Called synchronously from a worker
/// thread; the worker is busy until this returns.
pub trait SegmentRenderer: Send + Sync {
    fn render(&self, job: &SplitJob) -> Result<(), RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_messages() {
        let e = RenderError::Failed {
            program: "mpv".into(),
            code: Some(1),
        };
        assert_eq!(e.to_string(), "mpv exited with status 1");
        let e = RenderError::Failed {
            program: "mpv".into(),
            code: None,
        };
        assert_eq!(e.to_string(), "mpv exited with no status (terminated by signal)");
    }
}
