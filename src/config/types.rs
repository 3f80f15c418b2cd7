//! Core configuration types.
//! - Config holds one run's settings; immutable once the walk starts.
//! - LogLevel represents verbosity with simple parsing helpers.

use chrono::NaiveDate;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::OrganizeError;
use crate::i18n::DEFAULT_LANGUAGE;
use crate::partition::PartitionScheme;

/// Accepted cutoff date layout.
pub const CUTOFF_FORMAT: &str = "%Y-%m-%d";

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Parse a `YYYY-MM-DD` cutoff date.
pub fn parse_cutoff(s: &str) -> Result<NaiveDate, OrganizeError> {
    NaiveDate::parse_from_str(s.trim(), CUTOFF_FORMAT).map_err(|e| {
        OrganizeError::config(format!("cutoff '{s}' is not a YYYY-MM-DD date: {e}"))
    })
}

/// Runtime configuration used by the organizer.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tree whose files are relocated
    pub input_folder: PathBuf,
    /// Root of the partitioned layout; empty means "same as input"
    pub output_folder: PathBuf,
    /// Language tag for folder labels and messages
    pub language: String,
    pub scheme: PartitionScheme,
    /// Keep the path relative to the input root under the bucket
    pub preserve_structure: bool,
    /// Only files modified on or before this date are relocated
    pub cutoff: Option<NaiveDate>,
    /// If true, report actions but do not modify the filesystem
    pub dry_run: bool,
    /// Active log file; never relocated
    pub log_file: Option<PathBuf>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Skip the rename attempt and always copy + delete
    pub always_copy: bool,
    /// Exit non-zero when any file failed
    pub fail_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::new(),
            output_folder: PathBuf::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            scheme: PartitionScheme::default(),
            preserve_structure: false,
            cutoff: None,
            // Real changes need an explicit opt-out.
            dry_run: true,
            log_file: None,
            log_level: LogLevel::Normal,
            always_copy: false,
            fail_on_error: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit roots; other fields use defaults.
    pub fn new(input_folder: impl Into<PathBuf>, output_folder: impl Into<PathBuf>) -> Self {
        Self {
            input_folder: input_folder.into(),
            output_folder: output_folder.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_safe() {
        let cfg = Config::default();
        assert!(cfg.dry_run);
        assert_eq!(cfg.language, "en");
        assert_eq!(cfg.scheme, PartitionScheme::YearQuarter);
        assert!(!cfg.preserve_structure);
    }

    #[test]
    fn cutoff_parsing() {
        assert_eq!(
            parse_cutoff("2024-06-30").unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
        );
        assert!(matches!(
            parse_cutoff("30/06/2024"),
            Err(OrganizeError::ConfigurationInvalid(_))
        ));
        assert!(parse_cutoff("2024-02-30").is_err());
    }
}
