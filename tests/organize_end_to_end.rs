use chrono::{Local, TimeZone};
use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use file_organizer::{
    Config, RelocationOutcome, SkipReason, TransferMethod, organize, validate_and_normalize,
};

fn set_mtime(path: &Path, y: i32, m: u32, d: u32) {
    let t = Local.with_ymd_and_hms(y, m, d, 12, 0, 0).single().unwrap();
    set_file_mtime(path, FileTime::from_system_time(t.into())).unwrap();
}

fn write(path: &Path, body: &str, ymd: (i32, u32, u32)) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
    set_mtime(path, ymd.0, ymd.1, ymd.2);
}

#[test]
fn files_land_in_quarter_buckets_and_second_run_is_a_noop() {
    let td = tempdir().unwrap();
    let root = td.path().join("photos");
    write(&root.join("a.jpg"), "a", (2024, 2, 10));
    write(&root.join("trip/b.jpg"), "b", (2024, 8, 1));
    write(&root.join("trip/deep/c.jpg"), "c", (2023, 12, 31));

    let mut cfg = Config::new(&root, "");
    cfg.dry_run = false;
    validate_and_normalize(&mut cfg).unwrap();
    let root = cfg.input_folder.clone();

    let mut outcomes = Vec::new();
    let summary = organize(&cfg, &mut outcomes);
    assert_eq!(summary.moved, 3, "{outcomes:?}");
    assert_eq!(summary.failed, 0);
    assert!(outcomes.iter().all(|o| matches!(
        o,
        RelocationOutcome::Moved { method: TransferMethod::Renamed, .. }
    )));

    assert_eq!(fs::read_to_string(root.join("2024/Q1_Jan-Mar/a.jpg")).unwrap(), "a");
    assert_eq!(fs::read_to_string(root.join("2024/Q3_Jul-Sep/b.jpg")).unwrap(), "b");
    assert_eq!(fs::read_to_string(root.join("2023/Q4_Oct-Dec/c.jpg")).unwrap(), "c");
    assert!(!root.join("a.jpg").exists());
    assert!(!root.join("trip/b.jpg").exists());

    // Everything is already where it belongs.
    let mut again = Vec::new();
    let summary = organize(&cfg, &mut again);
    assert_eq!(summary.moved, 0);
    assert_eq!(summary.skipped, 3);
    assert!(again
        .iter()
        .all(|o| o.skip_reason() == Some(SkipReason::AlreadyRelocated)));
}

#[test]
fn preserve_structure_keeps_sub_folders_below_bucket() {
    let td = tempdir().unwrap();
    let input = td.path().join("in");
    write(&input.join("x/y/notes.txt"), "n", (2024, 5, 5));

    let mut cfg = Config::new(&input, td.path().join("out"));
    cfg.dry_run = false;
    cfg.preserve_structure = true;
    validate_and_normalize(&mut cfg).unwrap();

    let mut outcomes = Vec::new();
    organize(&cfg, &mut outcomes);
    let expected = cfg.output_folder.join("2024/Q2_Apr-Jun/x/y/notes.txt");
    assert!(expected.is_file(), "{outcomes:?}");
}

#[test]
fn spanish_half_years_and_day_hour_layouts() {
    let td = tempdir().unwrap();
    let input = td.path().join("in");
    write(&input.join("h.txt"), "h", (2022, 9, 3));

    let mut cfg = Config::new(&input, td.path().join("halves"));
    cfg.dry_run = false;
    cfg.language = "es".into();
    cfg.scheme = "medios-años".parse().unwrap();
    validate_and_normalize(&mut cfg).unwrap();
    organize(&cfg, &mut Vec::new());
    assert!(cfg.output_folder.join("2022-JUL-AGO-SEP-OCT-NOV-DIC/h.txt").is_file());

    write(&input.join("d.txt"), "d", (2022, 9, 3));
    let mut cfg = Config::new(&input, td.path().join("days"));
    cfg.dry_run = false;
    cfg.scheme = "day-hour".parse().unwrap();
    validate_and_normalize(&mut cfg).unwrap();
    organize(&cfg, &mut Vec::new());
    assert!(cfg.output_folder.join("2022-09-03/12PM/d.txt").is_file());
}
