//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Flags and their environment variables override XML values.
//! - --debug is a shorthand for --log-level debug.
//! - --dry-run wins over --apply and over `<dry_run>false</dry_run>`.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel, parse_cutoff};
use crate::errors::OrganizeError;
use crate::partition::PartitionScheme;

/// Relocate files into time-partitioned folders by modification time.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "file_organizer",
    author,
    version,
    about = "Organize files into time-partitioned folders by modification time"
)]
pub struct Args {
    /// Tree whose files are relocated.
    #[arg(short = 'i', long = "input", env = "ORGANIZER_INPUT", value_hint = ValueHint::DirPath)]
    pub input: Option<PathBuf>,

    /// Root of the partitioned layout (defaults to the input folder).
    #[arg(short = 'o', long = "output", env = "ORGANIZER_OUTPUT", value_hint = ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Language for folder labels and messages (en, es).
    #[arg(long = "lang", env = "ORGANIZER_LANG")]
    pub lang: Option<String>,

    /// Partition scheme: year-quarter, day-hour, half-year.
    #[arg(long, env = "ORGANIZER_SCHEME")]
    pub scheme: Option<String>,

    /// Keep each file's path relative to the input root below its bucket.
    #[arg(long)]
    pub preserve_structure: bool,

    /// Leave files modified after this date (YYYY-MM-DD) in place.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub cutoff: Option<String>,

    /// Report what would be moved without touching the filesystem (default).
    #[arg(long, help = "Show what would be done, but do not modify files/directories")]
    pub dry_run: bool,

    /// Actually move files.
    #[arg(long, help = "Move files for real (turns dry-run off)")]
    pub apply: bool,

    /// Log file path (defaults to a timestamped file in the output folder).
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Skip the rename attempt; always copy then delete.
    #[arg(long)]
    pub always_copy: bool,

    /// Exit non-zero when any file failed.
    #[arg(long)]
    pub fail_on_error: bool,

    /// Print where the config file is looked up, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,

    /// Write a commented template config file, then exit.
    #[arg(long, help = "Create a template config file and exit")]
    pub init_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Result<Option<LogLevel>, OrganizeError> {
        if self.debug {
            return Ok(Some(LogLevel::Debug));
        }
        self.log_level
            .as_deref()
            .map(|s| s.parse::<LogLevel>().map_err(OrganizeError::config))
            .transpose()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) -> Result<(), OrganizeError> {
        if let Some(p) = &self.input {
            cfg.input_folder = p.clone();
        }
        if let Some(p) = &self.output {
            cfg.output_folder = p.clone();
        }
        if let Some(l) = self.lang.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            cfg.language = l.to_string();
        }
        if let Some(s) = &self.scheme {
            cfg.scheme = s.trim().parse::<PartitionScheme>()?;
        }
        if self.preserve_structure {
            cfg.preserve_structure = true;
        }
        if let Some(c) = &self.cutoff {
            cfg.cutoff = Some(parse_cutoff(c)?);
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        if let Some(level) = self.effective_log_level()? {
            cfg.log_level = level;
        }
        if self.always_copy {
            cfg.always_copy = true;
        }
        if self.fail_on_error {
            cfg.fail_on_error = true;
        }
        if self.apply {
            cfg.dry_run = false;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        Ok(())
    }
}

pub fn parse() -> Args {
    Args::parse()
}
