//! Config validation logic.
//! Verifies the input root, prepares the output root, and canonicalizes both so
//! later path comparisons are exact.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::errors::OrganizeError;

use super::types::Config;

/// Validate and normalize `cfg` in place. Fatal errors only; nothing under the
/// input tree is touched.
pub fn validate_and_normalize(cfg: &mut Config) -> Result<(), OrganizeError> {
    if is_blank(&cfg.input_folder) {
        return Err(OrganizeError::config("input folder is required"));
    }
    if cfg.language.trim().is_empty() {
        cfg.language = crate::i18n::DEFAULT_LANGUAGE.to_string();
    }

    // 1) Input root: must exist, be a directory, and be readable.
    let input = &cfg.input_folder;
    ensure_input_dir(input)?;
    cfg.input_folder = canonical(input)?;

    // 2) Output root: defaults to input; created when missing.
    if is_blank(&cfg.output_folder) {
        cfg.output_folder = cfg.input_folder.clone();
    }
    ensure_dir_is_or_create(&cfg.output_folder)?;
    cfg.output_folder = canonical(&cfg.output_folder)?;

    info!(
        "Config validated: input='{}' output='{}' scheme={} dry_run={} log_file='{}'",
        cfg.input_folder.display(),
        cfg.output_folder.display(),
        cfg.scheme,
        cfg.dry_run,
        cfg.log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".into())
    );
    Ok(())
}

fn is_blank(p: &Path) -> bool {
    p.as_os_str().to_string_lossy().trim().is_empty()
}

fn ensure_input_dir(path: &Path) -> Result<(), OrganizeError> {
    let not_accessible = |reason: String| OrganizeError::InputNotAccessible {
        path: path.to_path_buf(),
        reason,
    };
    let meta = fs::metadata(path).map_err(|e| {
        error!("input folder does not exist: {}", path.display());
        not_accessible(format!("does not exist: {e}"))
    })?;
    if !meta.is_dir() {
        error!("input folder is not a directory: {}", path.display());
        return Err(not_accessible("not a directory".into()));
    }
    fs::read_dir(path).map_err(|e| not_accessible(format!("cannot read directory: {e}")))?;
    debug!("input folder readable: {}", path.display());
    Ok(())
}

/// Ensure directory exists (create if missing). If it exists, it must be a directory.
fn ensure_dir_is_or_create(path: &Path) -> Result<(), OrganizeError> {
    if path.exists() {
        if !path.is_dir() {
            error!("output folder exists but isn't a directory: {}", path.display());
            return Err(OrganizeError::config(format!(
                "output folder exists but isn't a directory: {}",
                path.display()
            )));
        }
    } else {
        fs::create_dir_all(path).map_err(|e| {
            OrganizeError::config(format!(
                "failed to create output folder '{}': {e}",
                path.display()
            ))
        })?;
        info!("Created output folder: {}", path.display());
    }
    Ok(())
}

fn canonical(path: &Path) -> Result<PathBuf, OrganizeError> {
    dunce::canonicalize(path).map_err(|e| {
        OrganizeError::config(format!("cannot resolve '{}': {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn blank_input_is_a_configuration_error() {
        let mut cfg = Config::new("  ", "");
        let err = validate_and_normalize(&mut cfg).unwrap_err();
        assert!(matches!(err, OrganizeError::ConfigurationInvalid(_)));
    }

    #[test]
    fn missing_input_is_not_accessible() {
        let temp = assert_fs::TempDir::new().unwrap();
        let mut cfg = Config::new(temp.child("nope").path(), "");
        let err = validate_and_normalize(&mut cfg).unwrap_err();
        assert!(matches!(err, OrganizeError::InputNotAccessible { .. }));
    }

    #[test]
    fn file_as_input_is_not_accessible() {
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("file.txt");
        f.touch().unwrap();
        let mut cfg = Config::new(f.path(), "");
        assert!(matches!(
            validate_and_normalize(&mut cfg),
            Err(OrganizeError::InputNotAccessible { .. })
        ));
    }

    #[test]
    fn output_defaults_to_input_and_is_canonical() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("in");
        input.create_dir_all().unwrap();
        let mut cfg = Config::new(input.path(), "");
        validate_and_normalize(&mut cfg).unwrap();
        assert_eq!(cfg.output_folder, cfg.input_folder);
        assert!(cfg.input_folder.is_absolute());
    }

    #[test]
    fn missing_output_is_created() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("in");
        input.create_dir_all().unwrap();
        let output = temp.child("out").child("nested");
        let mut cfg = Config::new(input.path(), output.path());
        validate_and_normalize(&mut cfg).unwrap();
        assert!(output.path().is_dir());
    }

    #[test]
    fn output_that_is_a_file_is_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.child("in");
        input.create_dir_all().unwrap();
        let output = temp.child("out.txt");
        output.touch().unwrap();
        let mut cfg = Config::new(input.path(), output.path());
        assert!(matches!(
            validate_and_normalize(&mut cfg),
            Err(OrganizeError::ConfigurationInvalid(_))
        ));
    }
}
