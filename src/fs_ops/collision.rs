//! Collision resolution.
//!
//! Policy: never overwrite. A free candidate is returned as-is; otherwise a
//! numeric disambiguator goes right before the extension:
//! - "photo.jpg"      -> "photo(1).jpg", "photo(2).jpg", ...
//! - ".env"           -> ".env(1)"
//! - "archive.tar.gz" -> "archive.tar(1).gz"
//!
//! Existence is injected so dry runs can count paths they already planned.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Return `candidate` if free, else the first free `name(n).ext` for n = 1, 2, ...
pub fn uniquify(candidate: &Path, exists: impl Fn(&Path) -> bool) -> PathBuf {
    if !exists(candidate) {
        return candidate.to_path_buf();
    }

    // Extract stem and extension, preserving non-UTF8 via OsString.
    let stem: OsString = candidate
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("file"));
    let ext: Option<OsString> = candidate.extension().map(|e| e.to_os_string());

    let mut n: u64 = 1;
    loop {
        let mut name = stem.clone();
        name.push(format!("({n})"));
        if let Some(e) = &ext {
            name.push(".");
            name.push(e);
        }
        let next = candidate.with_file_name(&name);
        if !exists(&next) {
            return next;
        }
        if n == 3 {
            trace!(path = %candidate.display(), "collision: several numbered variants exist, still searching");
        }
        n += 1;
    }
}

/// Any filesystem entry occupies a path, dangling symlinks included.
pub fn occupied_on_disk(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn free_candidate_is_unchanged() {
        let taken: HashSet<PathBuf> = HashSet::new();
        let p = Path::new("/o/file.txt");
        assert_eq!(uniquify(p, |q| taken.contains(q)), p);
    }

    #[test]
    fn suffix_goes_before_the_last_extension() {
        let taken: HashSet<PathBuf> = ["/o/archive.tar.gz", "/o/.env"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(
            uniquify(Path::new("/o/archive.tar.gz"), |q| taken.contains(q)),
            Path::new("/o/archive.tar(1).gz")
        );
        assert_eq!(
            uniquify(Path::new("/o/.env"), |q| taken.contains(q)),
            Path::new("/o/.env(1)")
        );
    }

    #[test]
    fn escalates_past_existing_variants() {
        let taken: HashSet<PathBuf> = ["/o/a.txt", "/o/a(1).txt", "/o/a(2).txt"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(
            uniquify(Path::new("/o/a.txt"), |q| taken.contains(q)),
            Path::new("/o/a(3).txt")
        );
    }
}
