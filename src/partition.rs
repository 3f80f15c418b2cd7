//! Time partitioning.
//! Maps a file's local modification time to a relative bucket directory.
//!
//! Layouts:
//! - year-quarter: `<root>/<YYYY>/Q<n>_<label>`
//! - half-year:    `<root>/<YYYY>-<label>`
//! - day-hour:     `<root>/<YYYY-MM-DD>/<HH><AM|PM>` (12-hour clock, language ignored)

use chrono::{Datelike, NaiveDateTime};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::OrganizeError;
use crate::i18n::LabelTables;

/// Named strategy for turning a timestamp into a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartitionScheme {
    #[default]
    YearQuarter,
    DayHour,
    HalfYear,
}

impl PartitionScheme {
    pub const ALL: [PartitionScheme; 3] = [
        PartitionScheme::YearQuarter,
        PartitionScheme::DayHour,
        PartitionScheme::HalfYear,
    ];

    /// Canonical tag.
    pub fn tag(self) -> &'static str {
        match self {
            PartitionScheme::YearQuarter => "year-quarter",
            PartitionScheme::DayHour => "day-hour",
            PartitionScheme::HalfYear => "half-year",
        }
    }

    /// Spanish spelling of the tag.
    pub fn spanish_tag(self) -> &'static str {
        match self {
            PartitionScheme::YearQuarter => "año-luego-cuartos",
            PartitionScheme::DayHour => "dia-luego-horas",
            PartitionScheme::HalfYear => "medios-años",
        }
    }

    /// Older long-form tag, still accepted on input.
    fn legacy_tag(self) -> &'static str {
        match self {
            PartitionScheme::YearQuarter => "year-then-quarters",
            PartitionScheme::DayHour => "day-then-hours",
            PartitionScheme::HalfYear => "half-years",
        }
    }

    /// Case-sensitive parse; unknown tags are rejected.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|scheme| s == scheme.tag() || s == scheme.spanish_tag() || s == scheme.legacy_tag())
    }
}

impl fmt::Display for PartitionScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PartitionScheme {
    type Err = OrganizeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            OrganizeError::config(format!(
                "unknown partition scheme '{s}' (expected one of: year-quarter, day-hour, half-year)"
            ))
        })
    }
}

/// Quarter number (1-4) for a month.
pub fn quarter_of(month: u32) -> Result<usize, OrganizeError> {
    check_month(month)?;
    Ok(((month - 1) / 3 + 1) as usize)
}

/// Half number (1-2) for a month.
pub fn half_of(month: u32) -> Result<usize, OrganizeError> {
    check_month(month)?;
    Ok(if month <= 6 { 1 } else { 2 })
}

// The timestamp crosses an external boundary; keep the range check.
fn check_month(month: u32) -> Result<(), OrganizeError> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(OrganizeError::InvalidTimestamp {
            reason: format!("month {month} is outside 1-12"),
        })
    }
}

/// Computes bucket directories from injected label tables.
#[derive(Debug, Clone, Default)]
pub struct Partitioner {
    labels: LabelTables,
}

impl Partitioner {
    pub fn new(labels: LabelTables) -> Self {
        Self { labels }
    }

    pub fn labels(&self) -> &LabelTables {
        &self.labels
    }

    /// Bucket directory for `ts` under `root`.
    pub fn partition_path(
        &self,
        root: &Path,
        ts: &NaiveDateTime,
        scheme: PartitionScheme,
        lang: &str,
    ) -> Result<PathBuf, OrganizeError> {
        match scheme {
            PartitionScheme::YearQuarter => {
                let q = quarter_of(ts.month())?;
                let folder = format!("Q{q}_{}", self.labels.quarter(lang, q));
                Ok(root.join(ts.year().to_string()).join(folder))
            }
            PartitionScheme::HalfYear => {
                let h = half_of(ts.month())?;
                Ok(root.join(format!("{}-{}", ts.year(), self.labels.half(lang, h))))
            }
            PartitionScheme::DayHour => {
                check_month(ts.month())?;
                Ok(root
                    .join(ts.format("%Y-%m-%d").to_string())
                    .join(ts.format("%I%p").to_string()))
            }
        }
    }
}
