//! Menu-driven sessions fed from an in-memory script.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use duty_rotation_lib::config::Config;
use duty_rotation_lib::scheduler::{DutyRotationScheduler, MAX_UNITS};

use crate::{run_menu, CliOptions};

fn config_for(path: &Path, autosave: bool) -> Config {
    let mut config = Config::default();
    config.storage.schedule_file = path.to_path_buf();
    config.storage.autosave = autosave;
    config
}

fn session(scheduler: &mut DutyRotationScheduler, config: &Config, script: &str) -> String {
    let mut out = Vec::new();
    run_menu(scheduler, config, Cursor::new(script.as_bytes()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn register_rotate_and_display() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schedule.csv");
    let config = config_for(&path, true);
    let mut scheduler = DutyRotationScheduler::new();

    let output = session(&mut scheduler, &config, "1\nAlice\n1\nBob\n2\n3\n6\n");

    assert!(output.contains("Assigned ambulance ID: A01"));
    assert!(output.contains("Assigned ambulance ID: A02"));
    assert!(output.contains("Shift rotation completed"));
    assert!(output.contains("Current duty ambulance: Ambulance A02 (Bob)"));
    assert!(output.contains("Next duty ambulance: Ambulance A01 (Alice)"));
    assert!(output.trim_end().ends_with("Goodbye!"));

    // Autosave wrote the rotated order
    let saved = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = saved.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("1,A02,Bob,In Duty,"));
    assert!(lines[2].starts_with("2,A01,Alice,Not in Duty,"));
}

#[test]
fn rotate_needs_two_units() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir.path().join("schedule.csv"), true);
    let mut scheduler = DutyRotationScheduler::new();

    let output = session(&mut scheduler, &config, "2\n1\nSolo\n2\n6\n");
    assert_eq!(
        output
            .matches("Need at least two ambulances to rotate shifts.")
            .count(),
        2
    );
}

#[test]
fn full_rotation_refuses_registration() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir.path().join("schedule.csv"), false);
    let mut scheduler = DutyRotationScheduler::new();

    let mut script = String::new();
    for n in 0..=MAX_UNITS {
        script.push_str(&format!("1\nDriver {n}\n"));
    }
    script.push_str("6\n");

    let output = session(&mut scheduler, &config, &script);
    assert!(output.contains("Unable to register ambulance. Queue is full."));
    assert_eq!(scheduler.len(), MAX_UNITS);
    // Autosave disabled: nothing written
    assert!(!config.storage.schedule_file.exists());
}

#[test]
fn blank_driver_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir.path().join("schedule.csv"), false);
    let mut scheduler = DutyRotationScheduler::new();

    let output = session(&mut scheduler, &config, "1\n   \n6\n");
    assert!(output.contains("Driver name cannot be empty."));
    assert!(scheduler.is_empty());
}

#[test]
fn invalid_and_unknown_choices() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir.path().join("schedule.csv"), false);
    let mut scheduler = DutyRotationScheduler::new();

    let output = session(&mut scheduler, &config, "abc\n9\n3\n6\n");
    assert!(output.contains("Invalid input. Please enter a number from 1 to 6."));
    assert!(output.contains("Unknown option. Please choose between 1 and 6."));
    assert!(output.contains("No ambulances registered yet."));
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir.path().join("schedule.csv"), false);
    let mut scheduler = DutyRotationScheduler::new();

    let output = session(&mut scheduler, &config, "1\nAlice\n");
    assert!(output.contains("Assigned ambulance ID: A01"));
    assert!(output.trim_end().ends_with("Goodbye!"));
}

#[test]
fn manual_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("schedule.csv");
    let config = config_for(&path, false);
    let mut scheduler = DutyRotationScheduler::new();

    let output = session(&mut scheduler, &config, "1\nAlice\n1\nBob\n4\n2\n5\n6\n");
    assert!(output.contains("Schedule saved to"));
    assert!(output.contains("Schedule reloaded: 2 ambulance(s) in rotation."));
    // Reload discarded the unsaved rotation
    assert_eq!(scheduler.on_duty().unwrap().id, "A01");
}

#[test]
fn cli_options_parse() {
    let args = ["--file", "rota.csv", "--json"].map(String::from);
    let options = CliOptions::parse(args).unwrap();
    assert_eq!(options.schedule_file, Some(PathBuf::from("rota.csv")));
    assert!(options.json);
    assert!(!options.show);
    assert_eq!(options.config_file, None);

    assert!(CliOptions::parse(["--file".to_string()]).is_err());
    assert!(CliOptions::parse(["--verbose".to_string()]).is_err());
}
