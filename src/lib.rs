//! Core library for `file_organizer`.
//!
//! Walks an input tree and relocates every regular file into a
//! time-partitioned layout under an output root, keyed by the file's local
//! modification time:
//! - `year-quarter`: `<out>/2024/Q1_Jan-Mar/report.pdf`
//! - `half-year`:    `<out>/2024-JAN-FEB-MAR-APR-MAY-JUN/report.pdf`
//! - `day-hour`:     `<out>/2024-02-10/03PM/report.pdf`
//!
//! Runs are dry by default. Moves use an atomic rename, falling back to a
//! copy that preserves the modification time followed by deleting the source.

pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod i18n;
pub mod outcome;
pub mod output;
pub mod partition;
pub mod platform;
pub mod report;
pub mod shutdown;
pub mod skip;
pub mod walker;

pub use config::types::{Config, LogLevel};
pub use config::{
    CONFIG_ENV, default_config_path, default_log_path, path_has_symlink_ancestor,
    validate_and_normalize,
};
pub use errors::OrganizeError;
pub use fs_ops::Relocator;
pub use i18n::{LabelTables, Message};
pub use outcome::{FileRecord, RelocationOutcome, RunSummary, SkipReason, TransferMethod};
pub use partition::{PartitionScheme, Partitioner};
pub use report::Reporter;
pub use skip::{SkipPolicy, SkipRule};
pub use walker::{OutcomeSink, Walker, organize};
