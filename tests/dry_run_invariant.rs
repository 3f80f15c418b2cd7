use chrono::{Local, TimeZone};
use filetime::{FileTime, set_file_mtime};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::tempdir;
use walkdir::WalkDir;

use file_organizer::{Config, RelocationOutcome, TransferMethod, organize, validate_and_normalize};

fn seed(root: &Path) {
    let t = |m, d| -> SystemTime {
        Local.with_ymd_and_hms(2024, m, d, 9, 30, 0).single().unwrap().into()
    };
    for (rel, m, d) in [
        ("a/report.pdf", 1, 3),
        ("b/report.pdf", 1, 20),
        ("c/report.pdf", 2, 14),
        ("summer.txt", 7, 4),
    ] {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().unwrap()).unwrap();
        fs::write(&p, rel).unwrap();
        set_file_mtime(&p, FileTime::from_system_time(t(m, d))).unwrap();
    }
}

fn snapshot(root: &Path) -> BTreeMap<PathBuf, Option<SystemTime>> {
    WalkDir::new(root)
        .into_iter()
        .map(|e| e.unwrap())
        .map(|e| {
            let mtime = e.file_type().is_file().then(|| e.metadata().unwrap().modified().unwrap());
            (e.path().strip_prefix(root).unwrap().to_path_buf(), mtime)
        })
        .collect()
}

fn planned(outcomes: &[RelocationOutcome], out: &Path) -> Vec<(PathBuf, PathBuf)> {
    outcomes
        .iter()
        .filter_map(|o| match o {
            RelocationOutcome::Moved { src, dest, .. } => Some((
                src.file_name().unwrap().into(),
                dest.strip_prefix(out).unwrap().to_path_buf(),
            )),
            _ => None,
        })
        .collect()
}

#[test]
fn dry_run_touches_nothing_and_matches_live_run() {
    let td = tempdir().unwrap();
    let dry_in = td.path().join("dry");
    let live_in = td.path().join("live");
    seed(&dry_in);
    seed(&live_in);

    let mut dry = Config::new(&dry_in, td.path().join("dry_out"));
    validate_and_normalize(&mut dry).unwrap();
    assert!(dry.dry_run, "dry-run is the default");
    let before = snapshot(&dry.input_folder);
    let mut dry_outcomes = Vec::new();
    let summary = organize(&dry, &mut dry_outcomes);
    assert_eq!(summary.moved, 4);
    assert_eq!(snapshot(&dry.input_folder), before);
    assert_eq!(fs::read_dir(&dry.output_folder).unwrap().count(), 0);
    assert!(dry_outcomes.iter().all(|o| matches!(
        o,
        RelocationOutcome::Moved { method: TransferMethod::Simulated, .. }
    )));

    let mut live = Config::new(&live_in, td.path().join("live_out"));
    live.dry_run = false;
    validate_and_normalize(&mut live).unwrap();
    let mut live_outcomes = Vec::new();
    organize(&live, &mut live_outcomes);

    let dry_plan = planned(&dry_outcomes, &dry.output_folder);
    assert_eq!(dry_plan, planned(&live_outcomes, &live.output_folder));
    assert!(dry_plan.contains(&("report.pdf".into(), "2024/Q1_Jan-Mar/report(1).pdf".into())));
    assert!(dry_plan.contains(&("report.pdf".into(), "2024/Q1_Jan-Mar/report(2).pdf".into())));
}

#[test]
fn dry_run_reuses_paths_freed_by_earlier_moves() {
    let td = tempdir().unwrap();
    let at = |m, d| -> SystemTime {
        Local.with_ymd_and_hms(2024, m, d, 12, 0, 0).single().unwrap().into()
    };
    let seed_misfiled = |root: &Path| {
        // Sits in the Q1 bucket but was modified in July.
        let misfiled = root.join("2024/Q1_Jan-Mar/a.txt");
        let newcomer = root.join("z/a.txt");
        for (p, t) in [(&misfiled, at(7, 2)), (&newcomer, at(1, 9))] {
            fs::create_dir_all(p.parent().unwrap()).unwrap();
            fs::write(p, "x").unwrap();
            set_file_mtime(p, FileTime::from_system_time(t)).unwrap();
        }
    };

    let run = |name: &str, dry_run: bool| {
        let root = td.path().join(name);
        seed_misfiled(&root);
        let mut cfg = Config::new(&root, "");
        cfg.dry_run = dry_run;
        validate_and_normalize(&mut cfg).unwrap();
        let mut outcomes = Vec::new();
        organize(&cfg, &mut outcomes);
        planned(&outcomes, &cfg.output_folder)
    };

    let dry = run("dry", true);
    let live = run("live", false);
    assert_eq!(dry, live);
    assert_eq!(
        dry,
        vec![
            ("a.txt".into(), "2024/Q3_Jul-Sep/a.txt".into()),
            ("a.txt".into(), "2024/Q1_Jan-Mar/a.txt".into()),
        ]
    );
}
