//! Relocation of a single file.
//! Bucket via the partitioner, skip checks on the raw destination, collision
//! resolution, then rename with a copy fallback (or a simulated move in dry-run).

use chrono::{DateTime, Local, NaiveDateTime};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

use super::atomic::try_atomic_move;
use super::collision::{occupied_on_disk, uniquify};
use super::copy::move_by_copy;
use super::helpers::{rename_fallback_hint, transfer_error};
use crate::config::types::Config;
use crate::errors::OrganizeError;
use crate::outcome::{FileRecord, RelocationOutcome, TransferMethod};
use crate::partition::Partitioner;
use crate::skip::SkipPolicy;

/// Rename step of a transfer; an error sends the file down the copy fallback.
pub type RenameFn = fn(&Path, &Path) -> io::Result<()>;

/// Relocates files for one run. Holds the run's partitioner and skip policy,
/// plus what a dry run has already planned: destinations it filled and
/// sources it emptied.
pub struct Relocator<'a> {
    config: &'a Config,
    partitioner: Partitioner,
    policy: SkipPolicy,
    rename: RenameFn,
    planned: HashSet<PathBuf>,
    vacated: HashSet<PathBuf>,
}

impl<'a> Relocator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self::with_parts(config, Partitioner::default(), SkipPolicy::from_config(config))
    }

    pub fn with_parts(config: &'a Config, partitioner: Partitioner, policy: SkipPolicy) -> Self {
        Self {
            config,
            partitioner,
            policy,
            rename: try_atomic_move,
            planned: HashSet::new(),
            vacated: HashSet::new(),
        }
    }

    /// Replace the rename step (e.g. to exercise the copy fallback).
    pub fn with_rename(mut self, rename: RenameFn) -> Self {
        self.rename = rename;
        self
    }

    /// Relocate (or simulate relocating) one file. Never panics on I/O; every
    /// failure comes back as `RelocationOutcome::Failed`.
    pub fn relocate(&mut self, record: &FileRecord) -> RelocationOutcome {
        let raw_dest = local_time(record.modified).and_then(|local| {
            self.raw_destination(&record.path, &local)
                .map(|dest| (local, dest))
        });
        let (local, raw_dest) = match raw_dest {
            Ok(p) => p,
            Err(error) => {
                return RelocationOutcome::Failed {
                    path: record.path.clone(),
                    dest: None,
                    error,
                };
            }
        };

        if let Some(reason) = self.policy.evaluate(&record.path, &raw_dest, &local) {
            debug!(src = %record.path.display(), %reason, "skip");
            return RelocationOutcome::Skipped {
                reason,
                path: record.path.clone(),
            };
        }

        let (planned, vacated) = (&self.planned, &self.vacated);
        let dest = uniquify(&raw_dest, |p| {
            (occupied_on_disk(p) && !vacated.contains(p)) || planned.contains(p)
        });

        if self.config.dry_run {
            info!(src = %record.path.display(), dest = %dest.display(), "dry-run: would move file");
            self.vacated.insert(record.path.clone());
            self.vacated.remove(&dest);
            self.planned.insert(dest.clone());
            return RelocationOutcome::Moved {
                src: record.path.clone(),
                dest,
                method: TransferMethod::Simulated,
            };
        }

        match self.transfer(record, &dest) {
            Ok(method) => RelocationOutcome::Moved {
                src: record.path.clone(),
                dest,
                method,
            },
            Err(error) => RelocationOutcome::Failed {
                path: record.path.clone(),
                dest: Some(dest),
                error,
            },
        }
    }

    /// Bucket directory plus either the base name or the path below the input root.
    fn raw_destination(&self, src: &Path, local: &NaiveDateTime) -> Result<PathBuf, OrganizeError> {
        let bucket = self.partitioner.partition_path(
            &self.config.output_folder,
            local,
            self.config.scheme,
            &self.config.language,
        )?;
        if self.config.preserve_structure {
            let rel = src.strip_prefix(&self.config.input_folder).map_err(|_| {
                OrganizeError::OutsideInputRoot {
                    path: src.to_path_buf(),
                    root: self.config.input_folder.clone(),
                }
            })?;
            Ok(bucket.join(rel))
        } else {
            let name = src.file_name().ok_or_else(|| OrganizeError::OutsideInputRoot {
                path: src.to_path_buf(),
                root: self.config.input_folder.clone(),
            })?;
            Ok(bucket.join(name))
        }
    }

    fn transfer(&self, record: &FileRecord, dest: &Path) -> Result<TransferMethod, OrganizeError> {
        let src = record.path.as_path();
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .map_err(transfer_error("create destination directory", parent))?;
        }

        if !self.config.always_copy {
            match (self.rename)(src, dest) {
                Ok(()) => {
                    info!(src = %src.display(), dest = %dest.display(), "Renamed file atomically");
                    return Ok(TransferMethod::Renamed);
                }
                Err(e) => {
                    let hint = rename_fallback_hint(&e);
                    warn!(error = %e, hint, "Atomic rename failed, using copy + delete");
                }
            }
        }

        move_by_copy(src, dest, record.modified)?;
        info!(src = %src.display(), dest = %dest.display(), "Copied file and removed original");
        Ok(TransferMethod::Copied)
    }
}

/// Local wall-clock modification time; buckets follow the user's calendar.
/// Times chrono cannot represent are an `InvalidTimestamp`, not a panic.
fn local_time(modified: SystemTime) -> Result<NaiveDateTime, OrganizeError> {
    let (secs, nanos) = match modified.duration_since(UNIX_EPOCH) {
        Ok(d) => (i64::try_from(d.as_secs()).ok(), d.subsec_nanos()),
        // Before the epoch: floor to whole seconds, keep nanos non-negative.
        Err(e) => {
            let d = e.duration();
            let secs = i64::try_from(d.as_secs()).ok().map(|s| -s);
            match d.subsec_nanos() {
                0 => (secs, 0),
                n => (secs.and_then(|s| s.checked_sub(1)), 1_000_000_000 - n),
            }
        }
    };
    secs.and_then(|s| DateTime::from_timestamp(s, nanos))
        .map(|utc| utc.with_timezone(&Local).naive_local())
        .ok_or_else(|| OrganizeError::InvalidTimestamp {
            reason: format!("modification time {modified:?} is outside the supported range"),
        })
}
