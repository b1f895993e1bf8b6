//! `mediainfo --Output=Audio;%Duration%` probe.

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use super::{DurationProbe, ProbeError};

const DURATION_TEMPLATE: &str = "--Output=Audio;%Duration%";

#[derive(Debug, Clone)]
pub struct MediainfoProbe {
    program: String,
}

impl MediainfoProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for MediainfoProbe {
    fn default() -> Self {
        Self::new("mediainfo")
    }
}

/// Parses mediainfo's audio duration (milliseconds, possibly fractional)
/// into seconds. Multi-track files print one value per line; the first wins.
pub fn parse_mediainfo_duration(output: &str) -> Result<f64, ProbeError> {
    let first = output
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("");
    let millis: f64 = first
        .parse()
        .map_err(|_| ProbeError::Unparseable(first.to_string()))?;
    if !millis.is_finite() || millis <= 0.0 {
        return Err(ProbeError::Unparseable(first.to_string()));
    }
    Ok(millis / 1000.0)
}

impl DurationProbe for MediainfoProbe {
    fn duration_secs(&self, path: &Path) -> Result<f64, ProbeError> {
        let output = Command::new(&self.program)
            .arg(DURATION_TEMPLATE)
            .arg(path)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ProbeError::NotInstalled {
                    program: self.program.clone(),
                },
                _ => ProbeError::Io {
                    program: self.program.clone(),
                    source,
                },
            })?;
        if !output.status.success() {
            return Err(ProbeError::Failed {
                program: self.program.clone(),
                code: output.status.code(),
            });
        }
        let secs = parse_mediainfo_duration(&String::from_utf8_lossy(&output.stdout))?;
        tracing::debug!(path = %path.display(), secs, "probed duration");
        Ok(secs)
    }
}
