//! Outcome reporting.
//! Turns run events into localized, structured tracing events.

use chrono::Local;
use std::path::Path;
use tracing::{error, info, warn};

use crate::config::types::Config;
use crate::errors::OrganizeError;
use crate::i18n::Message;
use crate::outcome::{RelocationOutcome, RunSummary, SkipReason, TransferMethod};
use crate::walker::OutcomeSink;

/// Logging collaborator for one run.
pub struct Reporter {
    lang: String,
}

impl Reporter {
    pub fn new(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }

    pub fn for_config(cfg: &Config) -> Self {
        Self::new(cfg.language.clone())
    }

    fn text(&self, msg: Message<'_>) -> String {
        msg.text(&self.lang)
    }

    pub fn run_started(&self, cfg: &Config) {
        let at = Local::now().to_rfc3339();
        info!(event = "run_started", "{}", self.text(Message::RunStarted { at: &at }));
        info!(input = %cfg.input_folder.display(), "{}", self.text(Message::InputFolder(&cfg.input_folder)));
        info!(output = %cfg.output_folder.display(), "{}", self.text(Message::OutputFolder(&cfg.output_folder)));
        if cfg.dry_run {
            warn!(dry_run = true, "{}", self.text(Message::DryRunNotice));
        }
    }

    pub fn run_finished(&self, summary: &RunSummary) {
        info!(
            event = "run_finished",
            moved = summary.moved,
            skipped = summary.skipped,
            failed = summary.failed,
            orphaned = summary.orphaned,
            traversal_errors = summary.traversal_errors,
            interrupted = summary.interrupted,
            "{}",
            self.summary_line(summary)
        );
        let at = Local::now().to_rfc3339();
        info!("{}", self.text(Message::Finished { at: &at }));
    }

    pub fn summary_line(&self, summary: &RunSummary) -> String {
        self.text(Message::Summary {
            moved: summary.moved,
            skipped: summary.skipped,
            failed: summary.failed,
        })
    }

    fn skipped(&self, reason: SkipReason, path: &Path) {
        let msg = match reason {
            SkipReason::AlreadyRelocated => Message::SkippedAlreadyRelocated(path),
            SkipReason::LogFile => Message::SkippedLogFile(path),
            SkipReason::AfterCutoff => Message::SkippedAfterCutoff(path),
        };
        info!(src = %path.display(), reason = reason.as_str(), "{}", self.text(msg));
    }

    fn failed(&self, path: &Path, dest: Option<&Path>, err: &OrganizeError) {
        let code = err.code();
        let kind = err.kind();
        if let OrganizeError::OrphanSourceAfterCopy { src, dest, .. } = err {
            error!(code, kind, src = %src.display(), dest = %dest.display(), error = %err,
                "{}", self.text(Message::OrphanSource { src, dest }));
            return;
        }
        let detail = err.to_string();
        let dest = dest.unwrap_or_else(|| Path::new(""));
        error!(code, kind, src = %path.display(), dest = %dest.display(),
            "{}", self.text(Message::MoveError { src: path, dest, error: &detail }));
    }
}

impl OutcomeSink for Reporter {
    fn record(&mut self, outcome: RelocationOutcome) {
        match &outcome {
            RelocationOutcome::Moved { src, dest, method } => {
                let msg = if *method == TransferMethod::Simulated {
                    Message::WouldMove { src, dest }
                } else {
                    Message::Moved { src, dest }
                };
                info!(src = %src.display(), dest = %dest.display(), method = ?method, "{}", self.text(msg));
            }
            RelocationOutcome::Skipped { reason, path } => self.skipped(*reason, path),
            RelocationOutcome::Failed { path, dest, error } => {
                self.failed(path, dest.as_deref(), error)
            }
        }
    }

    fn traversal_error(&mut self, path: Option<&Path>, error: &OrganizeError) {
        let detail = error.to_string();
        error!(
            code = error.code(),
            kind = error.kind(),
            path = %path.map(|p| p.display().to_string()).unwrap_or_default(),
            "{}",
            self.text(Message::TraversalError { error: &detail })
        );
    }

    fn interrupted(&mut self) {
        warn!("{}", self.text(Message::Interrupted));
    }
}
