#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::tempdir;

use file_organizer::{Config, OrganizeError, RelocationOutcome, organize, validate_and_normalize};

fn running_as_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[test]
fn undeletable_source_is_reported_as_orphan() {
    if running_as_root() {
        eprintln!("skipping: root ignores directory permissions");
        return;
    }
    let td = tempdir().unwrap();
    let input = td.path().join("in");
    let locked = input.join("locked");
    fs::create_dir_all(&locked).unwrap();
    fs::write(locked.join("keep.txt"), "data").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    let mut cfg = Config::new(&input, td.path().join("out"));
    cfg.dry_run = false;
    validate_and_normalize(&mut cfg).unwrap();

    let mut outcomes = Vec::new();
    let summary = organize(&cfg, &mut outcomes);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(summary.failed, 1, "{outcomes:?}");
    assert_eq!(summary.orphaned, 1);
    match &outcomes[0] {
        RelocationOutcome::Failed {
            error: OrganizeError::OrphanSourceAfterCopy { src, dest, .. },
            ..
        } => {
            assert!(src.is_file(), "original still present");
            assert_eq!(fs::read_to_string(dest).unwrap(), "data");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(outcomes[0].source(), cfg.input_folder.join("locked/keep.txt"));
}
