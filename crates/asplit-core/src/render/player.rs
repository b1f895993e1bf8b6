//! Renderer backed by an external player in encode mode (mpv by default).

use std::ffi::OsString;
use std::process::{Command, Stdio};

use crate::config::PlayerConfig;
use crate::job::SplitJob;
use crate::timecode::format_precise;

use super::{RenderError, SegmentRenderer};

/// Runs `<program> <extra_args..> --start=.. --end=.. --speed=.. <source> -o=<output>`
/// once per job and waits for it to exit.
#[derive(Debug, Clone)]
pub struct PlayerRenderer {
    program: String,
    extra_args: Vec<String>,
}

impl PlayerRenderer {
    pub fn new(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_args,
        }
    }

    pub fn from_config(cfg: &PlayerConfig) -> Self {
        Self::new(cfg.program.clone(), cfg.extra_args.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Player arguments for one job, without the program name.
pub fn player_args(extra_args: &[String], job: &SplitJob) -> Vec<OsString> {
    let mut args: Vec<OsString> = extra_args.iter().map(OsString::from).collect();
    args.push(format!("--start={}", format_precise(job.segment.start)).into());
    args.push(format!("--end={}", format_precise(job.segment.end)).into());
    args.push(format!("--speed={}", job.speed).into());
    args.push(job.source.clone().into_os_string());
    let mut output = OsString::from("-o=");
    output.push(job.output_path.as_os_str());
    args.push(output);
    args
}

impl SegmentRenderer for PlayerRenderer {
    fn render(&self, job: &SplitJob) -> Result<(), RenderError> {
        let args = player_args(&self.extra_args, job);
        tracing::debug!(program = %self.program, ?args, "spawning player");
        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .map_err(|source| RenderError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if status.success() {
            Ok(())
        } else {
            Err(RenderError::Failed {
                program: self.program.clone(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::{plan_segments, OutputNaming};
    use std::path::Path;

    fn sample_job() -> SplitJob {
        let naming = OutputNaming::new("out", "book-", "ogg");
        let segment = plan_segments(1200.0, 1830.5, 1200.0, 2)[0];
        SplitJob::new(Path::new("book.m4a"), segment, 1.25, &naming)
    }

    #[test]
    fn args_match_player_encode_mode() {
        let extra = vec!["--af=scaletempo".to_string(), "--no-terminal".to_string()];
        let args = player_args(&extra, &sample_job());
        let output = format!("-o={}", Path::new("out").join("book-2.ogg").display());
        let expected: Vec<OsString> = [
            "--af=scaletempo",
            "--no-terminal",
            "--start=00:20:00.000",
            "--end=00:30:30.500",
            "--speed=1.25",
            "book.m4a",
            output.as_str(),
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let renderer = PlayerRenderer::new("asplit-no-such-player-binary", Vec::new());
        let err = renderer.render(&sample_job()).unwrap_err();
        assert!(matches!(err, RenderError::Spawn { .. }), "{err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_maps_to_result() {
        let job = sample_job();
        assert!(PlayerRenderer::new("true", Vec::new()).render(&job).is_ok());
        let err = PlayerRenderer::new("false", Vec::new()).render(&job).unwrap_err();
        assert!(matches!(err, RenderError::Failed { code: Some(1), .. }), "{err:?}");
    }
}
