//! CLI for the asplit audio splitter.

mod commands;

use anyhow::Result;
use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use commands::{print_completions, print_man_page, run_split_command};

/// Split up an audio file into multiple shorter files.
#[derive(Debug, Parser)]
#[command(name = "asplit", version)]
#[command(about = "Split up an audio file into multiple shorter files", long_about = None)]
pub struct Cli {
    /// Audio file to split.
    #[arg(value_name = "FILE", required_unless_present_any = ["completions", "man"])]
    pub file: Option<PathBuf>,

    /// Starting position of the first part (defaults to 00:00:00).
    #[arg(short = 's', long, value_name = "HH:MM:SS")]
    pub start: Option<String>,

    /// Ending position of the last part (defaults to the end of the track).
    #[arg(short = 'e', long, value_name = "HH:MM:SS")]
    pub end: Option<String>,

    /// Speed-up factor.
    #[arg(long, default_value_t = 1.0, value_name = "FLOAT", allow_negative_numbers = true)]
    pub speedup: f64,

    /// Length of an individual part in minutes (defaults to 20, or the config value).
    #[arg(short = 'd', long, value_name = "MINUTES", allow_negative_numbers = true)]
    pub duration: Option<f64>,

    /// Directory to write the parts to (defaults to the working directory).
    #[arg(short = 'o', long = "outputdir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Audio format (file extension) of the parts (defaults to ogg, or the config value).
    #[arg(short = 'f', long, value_name = "FILETYPE")]
    pub format: Option<String>,

    /// Prefix of the parts' file names (defaults to the original file's name).
    #[arg(short = 'p', long, value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Number to start the parts' numbering from.
    #[arg(short = 'n', long = "numbering-start", default_value_t = 1, value_name = "N")]
    pub numbering_start: u64,

    /// Number of worker threads (defaults to 2, or the config value).
    #[arg(short = 't', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Show the files that would be created without creating them.
    #[arg(long)]
    pub dry_run: bool,

    /// Read configuration from this file instead of ~/.config/asplit/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print a shell completion script and exit.
    #[arg(long, value_name = "SHELL", value_enum, exclusive = true)]
    pub completions: Option<Shell>,

    /// Print a roff man page and exit.
    #[arg(long, exclusive = true)]
    pub man: bool,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let Some(shell) = cli.completions {
            return print_completions(shell);
        }
        if cli.man {
            return print_man_page();
        }

        run_split_command(cli)
    }
}

#[cfg(test)]
mod tests;
