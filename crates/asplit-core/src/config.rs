use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// External player used to render segments (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Player executable, looked up on `PATH` unless absolute.
    pub program: String,
    /// Arguments placed before the per-segment `--start/--end/--speed` options.
    pub extra_args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            program: "mpv".to_string(),
            extra_args: vec!["--af=scaletempo".to_string(), "--no-terminal".to_string()],
        }
    }
}

/// Duration probe tool (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    pub program: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            program: "mediainfo".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/asplit/config.toml`.
/// Command-line flags override these values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsplitConfig {
    /// Default length of one part in minutes.
    pub segment_minutes: f64,
    /// Default number of worker threads.
    pub threads: usize,
    /// Default output file extension.
    pub format: String,
    pub player: PlayerConfig,
    pub probe: ProbeConfig,
}

impl Default for AsplitConfig {
    fn default() -> Self {
        Self {
            segment_minutes: 20.0,
            threads: 2,
            format: "ogg".to_string(),
            player: PlayerConfig::default(),
            probe: ProbeConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("asplit")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AsplitConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = AsplitConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit path. The file must exist.
pub fn load_from(path: &Path) -> Result<AsplitConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: AsplitConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
