//! Input tree traversal.
//! Top-down, sorted by name, symlinks not followed. Directories are entered but
//! never relocated; each regular file goes through the relocator exactly once.
//! A bad entry is reported and the walk continues with its siblings.

use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::types::Config;
use crate::errors::OrganizeError;
use crate::fs_ops::{Relocator, io_error};
use crate::outcome::{FileRecord, RelocationOutcome, RunSummary};
use crate::shutdown;

/// Receives everything the walk produces, in order.
pub trait OutcomeSink {
    fn record(&mut self, outcome: RelocationOutcome);
    fn traversal_error(&mut self, path: Option<&Path>, error: &OrganizeError);
    fn interrupted(&mut self) {}
}

/// Collects outcomes in memory.
impl OutcomeSink for Vec<RelocationOutcome> {
    fn record(&mut self, outcome: RelocationOutcome) {
        self.push(outcome);
    }

    fn traversal_error(&mut self, _path: Option<&Path>, _error: &OrganizeError) {}
}

pub struct Walker<'a> {
    config: &'a Config,
    relocator: Relocator<'a>,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            relocator: Relocator::new(config),
        }
    }

    pub fn with_relocator(config: &'a Config, relocator: Relocator<'a>) -> Self {
        Self { config, relocator }
    }

    /// Walk the input root once, forwarding every outcome to `sink`.
    pub fn run(&mut self, sink: &mut dyn OutcomeSink) -> RunSummary {
        let mut summary = RunSummary::default();
        let walk = WalkDir::new(&self.config.input_folder)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walk {
            if shutdown::is_requested() {
                summary.interrupted = true;
                sink.interrupted();
                break;
            }
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf);
                    let detail = e.to_string();
                    let error = OrganizeError::Io {
                        detail,
                        source: io::Error::from(e),
                    };
                    warn!(error = %error, "traversal error; continuing");
                    summary.traversal_errors += 1;
                    sink.traversal_error(path.as_deref(), &error);
                    continue;
                }
            };

            let ftype = entry.file_type();
            if ftype.is_dir() {
                continue;
            }
            if !ftype.is_file() {
                debug!(path = %entry.path().display(), "not a regular file; left alone");
                continue;
            }

            let modified = entry
                .metadata()
                .map_err(io::Error::from)
                .and_then(|m| m.modified());
            let modified = match modified {
                Ok(t) => t,
                Err(e) => {
                    let error = io_error("read modification time", entry.path())(e);
                    warn!(error = %error, "traversal error; continuing");
                    summary.traversal_errors += 1;
                    sink.traversal_error(Some(entry.path()), &error);
                    continue;
                }
            };

            let record = FileRecord::file(entry.into_path(), modified);
            let outcome = self.relocator.relocate(&record);
            summary.record(&outcome);
            sink.record(outcome);
        }
        summary
    }
}

/// Convenience: walk `config.input_folder` with a fresh relocator.
pub fn organize(config: &Config, sink: &mut dyn OutcomeSink) -> RunSummary {
    Walker::new(config).run(sink)
}
