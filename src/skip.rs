//! Skip policy.
//! Ordered rules; the first one that matches decides, later rules are not consulted.

use chrono::{NaiveDate, NaiveDateTime};
use std::path::{Path, PathBuf};

use crate::config::types::Config;
use crate::outcome::SkipReason;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipRule {
    /// Source already sits at its computed destination.
    AlreadyRelocated,
    /// Source is the log file currently being written.
    IsLogFile(PathBuf),
    /// Source was modified after this date.
    AfterCutoff(NaiveDate),
}

impl SkipRule {
    fn matches(&self, src: &Path, raw_dest: &Path, modified: &NaiveDateTime) -> bool {
        match self {
            SkipRule::AlreadyRelocated => same_path(src, raw_dest),
            SkipRule::IsLogFile(log) => same_path(src, log),
            SkipRule::AfterCutoff(cutoff) => modified.date() > *cutoff,
        }
    }

    fn reason(&self) -> SkipReason {
        match self {
            SkipRule::AlreadyRelocated => SkipReason::AlreadyRelocated,
            SkipRule::IsLogFile(_) => SkipReason::LogFile,
            SkipRule::AfterCutoff(_) => SkipReason::AfterCutoff,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkipPolicy {
    rules: Vec<SkipRule>,
}

impl SkipPolicy {
    pub fn new(rules: Vec<SkipRule>) -> Self {
        Self { rules }
    }

    /// Rules in fixed order: already relocated, log file, cutoff (when configured).
    pub fn from_config(cfg: &Config) -> Self {
        let mut rules = vec![SkipRule::AlreadyRelocated];
        if let Some(log) = &cfg.log_file {
            rules.push(SkipRule::IsLogFile(log.clone()));
        }
        if let Some(cutoff) = cfg.cutoff {
            rules.push(SkipRule::AfterCutoff(cutoff));
        }
        Self { rules }
    }

    pub fn rules(&self) -> &[SkipRule] {
        &self.rules
    }

    pub fn evaluate(
        &self,
        src: &Path,
        raw_dest: &Path,
        modified: &NaiveDateTime,
    ) -> Option<SkipReason> {
        self.rules
            .iter()
            .find(|rule| rule.matches(src, raw_dest, modified))
            .map(SkipRule::reason)
    }
}

/// Absolute-path equality without touching the filesystem.
fn same_path(a: &Path, b: &Path) -> bool {
    match (std::path::absolute(a), std::path::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
