//! `asplit FILE` – plan the parts and render them (or list them with --dry-run).

use anyhow::{Context, Result};
use asplit_core::config::{self, AsplitConfig};
use asplit_core::probe::MediainfoProbe;
use asplit_core::render::PlayerRenderer;
use asplit_core::job::JobFailure;
use asplit_core::pool::FailureHook;
use asplit_core::{run_split_reporting, SplitOptions};
use std::io::{self, Write};
use std::sync::Arc;

use crate::cli::Cli;

/// Flags override config values; config values override built-in defaults.
pub(crate) fn split_options(cli: &Cli, cfg: &AsplitConfig) -> Result<SplitOptions> {
    let source = cli.file.clone().context("missing FILE argument")?;
    Ok(SplitOptions {
        source,
        start: cli.start.clone(),
        end: cli.end.clone(),
        speed: cli.speedup,
        segment_minutes: cli.duration.unwrap_or(cfg.segment_minutes),
        output_dir: cli.output_dir.clone(),
        format: cli.format.clone().unwrap_or_else(|| cfg.format.clone()),
        prefix: cli.prefix.clone(),
        numbering_start: cli.numbering_start,
        threads: cli.threads.unwrap_or(cfg.threads),
        dry_run: cli.dry_run,
    })
}

pub fn run_split_command(cli: Cli) -> Result<()> {
    let cfg = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load_or_init()?,
    };
    tracing::debug!("loaded config: {:?}", cfg);

    let options = split_options(&cli, &cfg)?;
    let probe = MediainfoProbe::new(cfg.probe.program.clone());
    let request = options.resolve(&probe)?;

    let renderer = Arc::new(PlayerRenderer::from_config(&cfg.player));
    let on_failure: FailureHook = Arc::new(|failure: &JobFailure| {
        let _ = writeln!(io::stderr().lock(), "error: {}", failure);
    });
    let summary = run_split_reporting(
        &request,
        renderer,
        &mut io::stdout().lock(),
        Some(on_failure),
    )
    .with_context(|| format!("failed to split '{}'", request.source.display()))?;

    if summary.dry_run {
        return Ok(());
    }
    eprintln!(
        "split {} part(s), {} failed",
        summary.planned,
        summary.failed()
    );
    Ok(())
}
