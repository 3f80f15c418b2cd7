//! Localized text.
//! - `Message` covers every user-facing line; `text(lang)` renders it.
//! - `LabelTables` holds the folder labels used by the partitioner.
//!
//! Lookup rule everywhere: exact language tag, else English. Never a failure.

use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Immutable quarter / half-year label tables keyed by language tag.
#[derive(Debug, Clone)]
pub struct LabelTables {
    quarters: HashMap<String, [String; 4]>,
    halves: HashMap<String, [String; 2]>,
}

impl Default for LabelTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LabelTables {
    /// English and Spanish tables.
    pub fn builtin() -> Self {
        let mut tables = Self::english_only();
        tables.insert_quarters("es", ["Ene-Mar", "Abr-Jun", "Jul-Sep", "Oct-Dic"]);
        tables.insert_halves("es", ["ENE-FEB-MAR-ABR-MAY-JUN", "JUL-AGO-SEP-OCT-NOV-DIC"]);
        tables
    }

    /// Only the English fallback; other languages can be added with the insert methods.
    pub fn english_only() -> Self {
        let mut tables = Self {
            quarters: HashMap::new(),
            halves: HashMap::new(),
        };
        tables.insert_quarters(
            DEFAULT_LANGUAGE,
            ["Jan-Mar", "Apr-Jun", "Jul-Sep", "Oct-Dec"],
        );
        tables.insert_halves(
            DEFAULT_LANGUAGE,
            ["JAN-FEB-MAR-APR-MAY-JUN", "JUL-AUG-SEP-OCT-NOV-DEC"],
        );
        tables
    }

    pub fn insert_quarters(&mut self, lang: &str, labels: [&str; 4]) {
        self.quarters
            .insert(lang.to_string(), labels.map(String::from));
    }

    pub fn insert_halves(&mut self, lang: &str, labels: [&str; 2]) {
        self.halves
            .insert(lang.to_string(), labels.map(String::from));
    }

    /// Label for quarter `q` (1-4).
    pub fn quarter(&self, lang: &str, q: usize) -> &str {
        let row = self
            .quarters
            .get(lang)
            .or_else(|| self.quarters.get(DEFAULT_LANGUAGE))
            .map(|r| r.as_slice())
            .unwrap_or(&[]);
        row.get(q.wrapping_sub(1)).map(String::as_str).unwrap_or("")
    }

    /// Label for half `h` (1-2).
    pub fn half(&self, lang: &str, h: usize) -> &str {
        let row = self
            .halves
            .get(lang)
            .or_else(|| self.halves.get(DEFAULT_LANGUAGE))
            .map(|r| r.as_slice())
            .unwrap_or(&[]);
        row.get(h.wrapping_sub(1)).map(String::as_str).unwrap_or("")
    }
}

/// Every line the tool shows to a human, with its arguments.
#[derive(Debug, Clone)]
pub enum Message<'a> {
    RunStarted { at: &'a str },
    InputFolder(&'a Path),
    OutputFolder(&'a Path),
    DryRunNotice,
    Moved { src: &'a Path, dest: &'a Path },
    WouldMove { src: &'a Path, dest: &'a Path },
    SkippedAlreadyRelocated(&'a Path),
    SkippedLogFile(&'a Path),
    SkippedAfterCutoff(&'a Path),
    MoveError { src: &'a Path, dest: &'a Path, error: &'a str },
    OrphanSource { src: &'a Path, dest: &'a Path },
    TraversalError { error: &'a str },
    Interrupted,
    Summary { moved: usize, skipped: usize, failed: usize },
    Finished { at: &'a str },
}

impl Message<'_> {
    /// Lookup key, stable across languages.
    pub fn key(&self) -> &'static str {
        match self {
            Message::RunStarted { .. } => "start_organizer",
            Message::InputFolder(_) => "input_folder",
            Message::OutputFolder(_) => "output_folder",
            Message::DryRunNotice => "dry_run_notice",
            Message::Moved { .. } => "moved_file",
            Message::WouldMove { .. } => "would_move_file",
            Message::SkippedAlreadyRelocated(_) => "skipping_file",
            Message::SkippedLogFile(_) => "skipping_log_file",
            Message::SkippedAfterCutoff(_) => "skipping_after_cutoff",
            Message::MoveError { .. } => "move_error",
            Message::OrphanSource { .. } => "orphan_source",
            Message::TraversalError { .. } => "error_organizing",
            Message::Interrupted => "interrupted",
            Message::Summary { .. } => "file_org_complete",
            Message::Finished { .. } => "finished",
        }
    }

    /// Render in `lang`, falling back to English.
    pub fn text(&self, lang: &str) -> String {
        let es = lang == "es";
        match self {
            Message::RunStarted { at } if es => {
                format!("=== Iniciando el organizador de archivos en {at} ===")
            }
            Message::RunStarted { at } => format!("=== Started File Organizer at {at} ==="),
            Message::InputFolder(p) if es => format!("Carpeta de entrada: {}", p.display()),
            Message::InputFolder(p) => format!("Input folder: {}", p.display()),
            Message::OutputFolder(p) if es => format!("Carpeta de salida: {}", p.display()),
            Message::OutputFolder(p) => format!("Output folder: {}", p.display()),
            Message::DryRunNotice if es => {
                "Modo de simulación: no se modificará ningún archivo (use --apply para mover)"
                    .to_string()
            }
            Message::DryRunNotice => {
                "Dry-run: no files will be changed (pass --apply to move them)".to_string()
            }
            Message::Moved { src, dest } if es => {
                format!("Movido: {:?} => {:?}", src.display(), dest.display())
            }
            Message::Moved { src, dest } => {
                format!("Moved: {:?} => {:?}", src.display(), dest.display())
            }
            Message::WouldMove { src, dest } if es => format!(
                "Simulación: se movería {:?} => {:?}",
                src.display(),
                dest.display()
            ),
            Message::WouldMove { src, dest } => {
                format!("Dry-run: would move {:?} => {:?}", src.display(), dest.display())
            }
            Message::SkippedAlreadyRelocated(p) if es => format!(
                "Saltando archivo, ya se encuentra en carpeta de salida: {}",
                p.display()
            ),
            Message::SkippedAlreadyRelocated(p) => {
                format!("Skipping file already in output folder: {}", p.display())
            }
            Message::SkippedLogFile(p) if es => {
                format!("Saltando el archivo de registro activo: {}", p.display())
            }
            Message::SkippedLogFile(p) => format!("Skipping active log file: {}", p.display()),
            Message::SkippedAfterCutoff(p) if es => format!(
                "Saltando archivo modificado después de la fecha límite: {}",
                p.display()
            ),
            Message::SkippedAfterCutoff(p) => {
                format!("Skipping file modified after cutoff: {}", p.display())
            }
            Message::MoveError { src, dest, error } if es => format!(
                "Error al mover archivo {:?} a {:?}: {error}",
                src.display(),
                dest.display()
            ),
            Message::MoveError { src, dest, error } => format!(
                "Error moving file {:?} to {:?}: {error}",
                src.display(),
                dest.display()
            ),
            Message::OrphanSource { src, dest } if es => format!(
                "Copia creada en {:?} pero el original {:?} no se pudo borrar; ahora existen dos copias",
                dest.display(),
                src.display()
            ),
            Message::OrphanSource { src, dest } => format!(
                "Copied to {:?} but original {:?} could not be removed; a duplicate now exists",
                dest.display(),
                src.display()
            ),
            Message::TraversalError { error } if es => {
                format!("Error organizando archivos: {error}")
            }
            Message::TraversalError { error } => format!("Error organizing files: {error}"),
            Message::Interrupted if es => {
                "Interrupción recibida; deteniendo antes del siguiente archivo".to_string()
            }
            Message::Interrupted => "Interrupt received; stopping before the next file".to_string(),
            Message::Summary {
                moved,
                skipped,
                failed,
            } if es => format!(
                "Organización de archivos completa. Movidos: {moved}, saltados: {skipped}, fallidos: {failed}"
            ),
            Message::Summary {
                moved,
                skipped,
                failed,
            } => format!(
                "File organization complete. Moved: {moved}, skipped: {skipped}, failed: {failed}"
            ),
            Message::Finished { at } if es => format!("=== Finalizado a las {at} ==="),
            Message::Finished { at } => format!("=== Finished at {at} ==="),
        }
    }
}
