//! Application orchestrator.
//! Loads/merges config, validates the roots, initializes logging, installs the
//! interrupt handler, and runs the walk.

use anyhow::{Result, bail};
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};

use file_organizer::cli::Args;
use file_organizer::config::{create_template_config, load_config_from_xml};
use file_organizer::output as out;
use file_organizer::{
    CONFIG_ENV, Config, OrganizeError, Reporter, default_config_path, default_log_path,
    organize, shutdown, validate_and_normalize,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Config-file housekeeping happens before logging init.
    if args.print_config {
        print_config_location();
        return Ok(());
    }
    if args.init_config {
        let Some(path) = default_config_path() else {
            bail!("could not determine a config location; set {CONFIG_ENV}");
        };
        create_template_config(&path)?;
        out::print_success(&format!("Template config written to: {}", path.display()));
        out::print_info("Edit input_folder/output_folder, then re-run with --apply to move files.");
        return Ok(());
    }

    let mut cfg = build_config(&args).inspect_err(report_fatal)?;
    validate_and_normalize(&mut cfg).inspect_err(report_fatal)?;

    // The active log file lives under the output root unless overridden.
    let log_path = cfg
        .log_file
        .clone()
        .unwrap_or_else(|| default_log_path(&cfg.output_folder));
    let guard = init_tracing(&cfg.log_level, Some(&log_path), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;
    // Canonical so the self-exclusion check compares exact paths.
    cfg.log_file = Some(dunce::canonicalize(&log_path).unwrap_or(log_path));

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard));
    {
        let guard_slot = Arc::clone(&guard_slot);
        let handler = ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        });
        if let Err(e) = handler {
            debug!(error = %e, "could not install interrupt handler");
        }
    }

    debug!("Starting file_organizer: {:?}", args);
    let mut reporter = Reporter::for_config(&cfg);
    reporter.run_started(&cfg);
    let summary = organize(&cfg, &mut reporter);
    reporter.run_finished(&summary);

    let line = reporter.summary_line(&summary);
    if summary.has_failures() {
        out::print_warn(&line);
    } else {
        out::print_success(&line);
    }
    if summary.orphaned > 0 {
        out::print_warn(&format!(
            "{} file(s) were copied but their originals could not be removed; see the log",
            summary.orphaned
        ));
    }
    if cfg.dry_run && summary.moved > 0 {
        out::print_info("Dry-run only; re-run with --apply to move these files.");
    }
    if let Some(log) = &cfg.log_file {
        info!(log = %log.display(), "log written");
    }

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    if cfg.fail_on_error && summary.has_failures() {
        bail!(
            "{} file(s) failed and {} traversal error(s) occurred",
            summary.failed,
            summary.traversal_errors
        );
    }
    Ok(())
}

/// Defaults, then the XML file, then flags and environment.
fn build_config(args: &Args) -> Result<Config, OrganizeError> {
    let mut cfg = Config::default();
    if let Some(path) = load_config_from_xml(&mut cfg)? {
        debug!("loaded config from {}", path.display());
    }
    args.apply_overrides(&mut cfg)?;
    Ok(cfg)
}

fn report_fatal(e: &OrganizeError) {
    error!(code = e.code(), kind = e.kind(), "{e}");
    out::print_error(&e.to_string());
}

fn print_config_location() {
    if let Ok(p) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {p}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or point it at another file."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default file_organizer config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file already exists at that location.");
            } else {
                out::print_info("No config file exists there yet. Run with --init-config to create a template.");
            }
        }
        None => out::print_error("Could not determine a default config path."),
    }
}
