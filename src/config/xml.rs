//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Writes a commented template on request (`--init-config`).
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation happens elsewhere.
//! - Unknown XML fields are an error so misconfigurations surface early.

use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::paths::{default_config_path, path_has_symlink_ancestor};
use super::types::{Config, LogLevel, parse_cutoff};
use crate::errors::OrganizeError;
use crate::partition::PartitionScheme;
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    input_folder: Option<String>,
    output_folder: Option<String>,
    language: Option<String>,
    scheme: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    preserve_structure: Option<bool>,
    cutoff: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    dry_run: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    always_copy: Option<bool>,
    #[serde(default, deserialize_with = "de_bool_trimmed_opt")]
    fail_on_error: Option<bool>,
}

// Custom deserializer that trims surrounding whitespace for optional booleans
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(Some(true)),
            "false" | "no" | "0" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!("invalid boolean '{other}'"))),
        },
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Apply the parsed XML values on top of `cfg`.
fn apply_xml(parsed: XmlConfig, cfg: &mut Config) -> Result<(), OrganizeError> {
    if let Some(s) = non_empty(parsed.input_folder.as_deref()) {
        cfg.input_folder = PathBuf::from(s);
    }
    if let Some(s) = non_empty(parsed.output_folder.as_deref()) {
        cfg.output_folder = PathBuf::from(s);
    }
    if let Some(s) = non_empty(parsed.language.as_deref()) {
        cfg.language = s.to_string();
    }
    if let Some(s) = non_empty(parsed.scheme.as_deref()) {
        cfg.scheme = s.parse::<PartitionScheme>()?;
    }
    if let Some(s) = non_empty(parsed.cutoff.as_deref()) {
        cfg.cutoff = Some(parse_cutoff(s)?);
    }
    if let Some(s) = non_empty(parsed.log_level.as_deref()) {
        cfg.log_level = s.parse::<LogLevel>().map_err(OrganizeError::config)?;
    }
    if let Some(s) = non_empty(parsed.log_file.as_deref()) {
        cfg.log_file = Some(PathBuf::from(s));
    }
    if let Some(b) = parsed.preserve_structure {
        cfg.preserve_structure = b;
    }
    if let Some(b) = parsed.dry_run {
        cfg.dry_run = b;
    }
    if let Some(b) = parsed.always_copy {
        cfg.always_copy = b;
    }
    if let Some(b) = parsed.fail_on_error {
        cfg.fail_on_error = b;
    }
    Ok(())
}

/// Parse XML text on top of `cfg`.
pub fn apply_xml_str(contents: &str, cfg: &mut Config) -> Result<(), OrganizeError> {
    let parsed: XmlConfig = from_xml_str(contents)
        .map_err(|e| OrganizeError::config(format!("parse config xml: {e}")))?;
    apply_xml(parsed, cfg)
}

/// Load a specific XML file on top of `cfg`.
pub fn load_config_from_xml_path(path: &Path, cfg: &mut Config) -> Result<(), OrganizeError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        OrganizeError::config(format!("read config xml '{}': {e}", path.display()))
    })?;
    apply_xml_str(&contents, cfg)
}

/// Load the default (or `$FILE_ORGANIZER_CONFIG`) XML file if present.
/// Returns the path that was applied, or None when no file exists.
pub fn load_config_from_xml(cfg: &mut Config) -> Result<Option<PathBuf>, OrganizeError> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        debug!("no config file at {}", path.display());
        return Ok(None);
    }
    load_config_from_xml_path(&path, cfg)?;
    Ok(Some(path))
}

/// Create a template config file and parent directory (best-effort permissions).
/// Uses secure creation to avoid following attacker-controlled symlinks on Unix.
pub fn create_template_config(path: &Path) -> anyhow::Result<()> {
    if path_has_symlink_ancestor(path)? {
        anyhow::bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }
    if path.exists() {
        anyhow::bail!("Config file already exists: {}", path.display());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let content = format!(
        "<!--\n  file_organizer configuration (XML)\n\n  Fields:\n    input_folder        -> tree whose files are relocated (required here or on the command line)\n    output_folder       -> root of the partitioned layout (defaults to input_folder)\n    language            -> en | es (labels and messages; unknown tags fall back to en)\n    scheme              -> {} | {} | {}\n    preserve_structure  -> keep sub-folders below the time bucket (true/false)\n    cutoff              -> YYYY-MM-DD; files modified after it are left alone\n    dry_run             -> true reports only; set false to move files\n    log_level           -> quiet | normal | info | debug\n    log_file            -> log path (defaults to a timestamped file in output_folder)\n    always_copy         -> copy + delete instead of rename (true/false)\n    fail_on_error       -> exit non-zero if any file failed (true/false)\n\n  CLI flags and environment variables override XML values.\n-->\n<config>\n  <input_folder></input_folder>\n  <output_folder></output_folder>\n  <language>en</language>\n  <scheme>{}</scheme>\n  <preserve_structure>false</preserve_structure>\n  <cutoff></cutoff>\n  <dry_run>true</dry_run>\n  <log_level>normal</log_level>\n  <log_file></log_file>\n  <always_copy>false</always_copy>\n  <fail_on_error>false</fail_on_error>\n</config>\n",
        PartitionScheme::YearQuarter,
        PartitionScheme::DayHour,
        PartitionScheme::HalfYear,
        PartitionScheme::default(),
    );

    // Atomic, secure write (create_new on a temp sibling), then tighten perms.
    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}
