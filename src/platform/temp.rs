//! Unique hidden sibling names for temp files (config writes, copy fallback).
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Prefix shared by every temp file this tool creates.
pub const TEMP_PREFIX: &str = ".file_organizer.";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Pattern: `.file_organizer.<pid>.<nanos>.<seq>.tmp` next to `target`.
pub fn tmp_sibling_name(target: &Path) -> PathBuf {
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
    let name = format!("{TEMP_PREFIX}{pid}.{nanos}.{seq}.tmp");
    target.parent().unwrap_or_else(|| Path::new(".")).join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique_and_siblings() {
        let target = Path::new("/srv/out/2024/a.txt");
        let mut set = HashSet::new();
        for _ in 0..64 {
            let p = tmp_sibling_name(target);
            assert_eq!(p.parent(), target.parent());
            assert!(set.insert(p));
        }
    }
}
