//! Per-file records and results.

use std::fmt;
use std::path::PathBuf;
use std::time::SystemTime;

use crate::errors::OrganizeError;

/// One regular file found by the walker, consumed by the relocator.
/// Directories are filtered at the walk boundary and never get a record.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl FileRecord {
    pub fn file(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        Self {
            path: path.into(),
            modified,
        }
    }
}

/// Why a file was left in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyRelocated,
    LogFile,
    AfterCutoff,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::AlreadyRelocated => "already relocated",
            SkipReason::LogFile => "active log file",
            SkipReason::AfterCutoff => "after cutoff",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the bytes reached the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMethod {
    Renamed,
    Copied,
    /// Dry-run: nothing touched.
    Simulated,
}

#[derive(Debug)]
pub enum RelocationOutcome {
    Moved {
        src: PathBuf,
        dest: PathBuf,
        method: TransferMethod,
    },
    Skipped {
        reason: SkipReason,
        path: PathBuf,
    },
    Failed {
        path: PathBuf,
        dest: Option<PathBuf>,
        error: OrganizeError,
    },
}

impl RelocationOutcome {
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            RelocationOutcome::Skipped { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    pub fn source(&self) -> &std::path::Path {
        match self {
            RelocationOutcome::Moved { src, .. } => src,
            RelocationOutcome::Skipped { path, .. } => path,
            RelocationOutcome::Failed { path, .. } => path,
        }
    }
}

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub moved: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Subset of `failed` where a duplicate was left behind.
    pub orphaned: usize,
    pub traversal_errors: usize,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &RelocationOutcome) {
        match outcome {
            RelocationOutcome::Moved { .. } => self.moved += 1,
            RelocationOutcome::Skipped { .. } => self.skipped += 1,
            RelocationOutcome::Failed { error, .. } => {
                self.failed += 1;
                if matches!(error, OrganizeError::OrphanSourceAfterCopy { .. }) {
                    self.orphaned += 1;
                }
            }
        }
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.traversal_errors > 0
    }
}
