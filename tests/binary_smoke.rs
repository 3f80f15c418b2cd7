use chrono::{Local, TimeZone};
use filetime::{FileTime, set_file_mtime};
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn organizer(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("file_organizer"));
    cmd.env("FILE_ORGANIZER_CONFIG", config_dir.join("none.xml"))
        .env_remove("ORGANIZER_INPUT")
        .env_remove("ORGANIZER_OUTPUT")
        .env_remove("ORGANIZER_LANG")
        .env_remove("ORGANIZER_SCHEME");
    cmd
}

#[test]
fn binary_print_config_succeeds() {
    let td = tempdir().unwrap();
    let out = organizer(td.path())
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
    assert!(String::from_utf8_lossy(&out.stdout).contains("none.xml"));
}

#[test]
fn missing_input_fails_without_side_effects() {
    let td = tempdir().unwrap();
    let out = organizer(td.path())
        .args(["--input"])
        .arg(td.path().join("nope"))
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("not accessible"));
}

#[test]
fn default_run_is_dry_and_apply_moves() {
    let td = tempdir().unwrap();
    let input = td.path().join("in");
    fs::create_dir_all(&input).unwrap();
    let file = input.join("memo.txt");
    fs::write(&file, "m").unwrap();
    let when = Local.with_ymd_and_hms(2020, 10, 10, 12, 0, 0).single().unwrap();
    set_file_mtime(&file, FileTime::from_system_time(when.into())).unwrap();

    let dry = organizer(td.path()).arg("-i").arg(&input).output().unwrap();
    assert!(dry.status.success(), "{}", String::from_utf8_lossy(&dry.stderr));
    assert!(file.is_file(), "dry-run leaves the file in place");

    let live = organizer(td.path())
        .arg("-i")
        .arg(&input)
        .arg("--apply")
        .output()
        .unwrap();
    assert!(live.status.success(), "{}", String::from_utf8_lossy(&live.stderr));
    assert!(!file.exists());
    assert!(input.join("2020/Q4_Oct-Dec/memo.txt").is_file());

    // The run's log file sits hidden in the output root and was not relocated.
    let logs: Vec<_> = fs::read_dir(&input)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with(".organizer_") && n.ends_with(".log"))
        .collect();
    assert!(!logs.is_empty());
}
