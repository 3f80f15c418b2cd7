use chrono::{Local, NaiveDate, TimeZone};
use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use file_organizer::{Config, SkipReason, organize, validate_and_normalize};

fn touch_at(path: &Path, y: i32, m: u32, d: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "x").unwrap();
    let t = Local.with_ymd_and_hms(y, m, d, 12, 0, 0).single().unwrap();
    set_file_mtime(path, FileTime::from_system_time(t.into())).unwrap();
}

#[test]
fn files_after_cutoff_stay_put() {
    let td = tempdir().unwrap();
    let input = td.path().join("in");
    touch_at(&input.join("june.txt"), 2024, 6, 15);
    touch_at(&input.join("boundary.txt"), 2024, 6, 30);
    touch_at(&input.join("july.txt"), 2024, 7, 1);

    let mut cfg = Config::new(&input, td.path().join("out"));
    cfg.dry_run = false;
    cfg.cutoff = NaiveDate::from_ymd_opt(2024, 6, 30);
    validate_and_normalize(&mut cfg).unwrap();

    let mut outcomes = Vec::new();
    let summary = organize(&cfg, &mut outcomes);
    assert_eq!(summary.moved, 2);
    assert_eq!(summary.skipped, 1);
    let skipped = outcomes.iter().find(|o| o.skip_reason().is_some()).unwrap();
    assert_eq!(skipped.skip_reason(), Some(SkipReason::AfterCutoff));
    assert!(skipped.source().ends_with("july.txt"));

    assert!(cfg.output_folder.join("2024/Q2_Apr-Jun/june.txt").is_file());
    assert!(cfg.output_folder.join("2024/Q2_Apr-Jun/boundary.txt").is_file());
    assert!(cfg.input_folder.join("july.txt").is_file());
}

#[test]
fn active_log_file_inside_input_is_never_moved() {
    let td = tempdir().unwrap();
    let input = td.path().join("in");
    touch_at(&input.join("doc.txt"), 2024, 3, 3);
    touch_at(&input.join("logs/run.log"), 2024, 3, 3);

    let mut cfg = Config::new(&input, "");
    cfg.dry_run = false;
    validate_and_normalize(&mut cfg).unwrap();
    cfg.log_file = Some(cfg.input_folder.join("logs/run.log"));

    let mut outcomes = Vec::new();
    let summary = organize(&cfg, &mut outcomes);
    assert_eq!(summary.moved, 1);
    assert!(outcomes
        .iter()
        .any(|o| o.skip_reason() == Some(SkipReason::LogFile)));
    assert!(cfg.input_folder.join("logs/run.log").is_file());
    assert!(cfg.input_folder.join("2024/Q1_Jan-Mar/doc.txt").is_file());
}
