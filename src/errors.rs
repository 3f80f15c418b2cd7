//! Typed error definitions for file_organizer.
//! Fatal variants abort the run before any file is touched; the rest are
//! recorded per file and the walk carries on.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrganizeError {
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    #[error("Input folder not accessible {path}: {reason}")]
    InputNotAccessible { path: PathBuf, reason: String },

    #[error("Invalid timestamp: {reason}")]
    InvalidTimestamp { reason: String },

    #[error("{detail}")]
    TransferFailure {
        detail: String,
        #[source]
        source: io::Error,
    },

    #[error("Copied to {dest} but could not remove original {src}: {source}")]
    OrphanSourceAfterCopy {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Path {path} is not inside input folder {root}")]
    OutsideInputRoot { path: PathBuf, root: PathBuf },

    #[error("{detail}")]
    Io {
        detail: String,
        #[source]
        source: io::Error,
    },
}

impl OrganizeError {
    /// Stable numeric code, emitted as a structured log field.
    pub fn code(&self) -> u16 {
        match self {
            OrganizeError::ConfigurationInvalid(_) => 10,
            OrganizeError::InputNotAccessible { .. } => 11,
            OrganizeError::InvalidTimestamp { .. } => 20,
            OrganizeError::TransferFailure { .. } => 30,
            OrganizeError::OrphanSourceAfterCopy { .. } => 31,
            OrganizeError::OutsideInputRoot { .. } => 32,
            OrganizeError::Io { .. } => 40,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OrganizeError::ConfigurationInvalid(_) => "configuration_invalid",
            OrganizeError::InputNotAccessible { .. } => "input_not_accessible",
            OrganizeError::InvalidTimestamp { .. } => "invalid_timestamp",
            OrganizeError::TransferFailure { .. } => "transfer_failure",
            OrganizeError::OrphanSourceAfterCopy { .. } => "orphan_source_after_copy",
            OrganizeError::OutsideInputRoot { .. } => "outside_input_root",
            OrganizeError::Io { .. } => "io",
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        OrganizeError::ConfigurationInvalid(msg.into())
    }
}
