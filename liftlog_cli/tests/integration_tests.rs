//! Integration tests for the liftlog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Unit preference handling
//! - Logging sets and progression suggestions
//! - Workout completion, redo and statistics
//! - Weekly alternation and data reset

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI pointed at a data directory on a fixed day
///
/// The config path is never created, so the user's own config file is
/// not read and defaults apply.
fn cli(data_dir: &Path, today: &str) -> Command {
    cli_with_config(data_dir, &data_dir.join("liftlog.toml"), today)
}

fn cli_with_config(data_dir: &Path, config: &Path, today: &str) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liftlog"));
    cmd.arg("--config")
        .arg(config)
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--today")
        .arg(today);
    cmd
}

fn read_json(path: &Path) -> serde_json::Value {
    let contents = fs::read_to_string(path).expect("Failed to read document");
    serde_json::from_str(&contents).expect("Document is not valid JSON")
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("liftlog"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Workout progression and history tracker",
        ));
}

#[test]
fn test_unit_defaults_to_kg_and_toggles() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir, "2024-01-03")
        .arg("unit")
        .assert()
        .success()
        .stdout(predicate::str::contains("Display unit: kg"));

    cli(data_dir, "2024-01-03")
        .args(["unit", "--toggle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Display unit: lbs"));

    let prefs = read_json(&data_dir.join("workout_preferences.json"));
    assert_eq!(prefs["unit"], "lbs");
}

#[test]
fn test_invalid_unit_fails() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), "2024-01-03")
        .args(["unit", "stone"])
        .assert()
        .failure();
}

#[test]
fn test_log_then_suggest_progression() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir, "2024-01-03")
        .args(["log", "bench_press", "--weight", "50", "--reps", "12", "--sets", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged Bench Press: 50 kg"));

    cli(data_dir, "2024-01-05")
        .args(["suggest", "bench_press", "--reps", "8-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("52.5 kg"))
        .stdout(predicate::str::contains("Progress! +2.5kg from last time"));
}

#[test]
fn test_config_flag_sets_increment() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().join("data");
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(&config_path, "[progression]\nincrement_kg = 5.0\n").unwrap();

    cli(&data_dir, "2024-01-03")
        .args(["log", "bench_press", "--weight", "50", "--reps", "12"])
        .assert()
        .success();

    cli_with_config(&data_dir, &config_path, "2024-01-05")
        .args(["suggest", "bench_press", "--reps", "8-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("55 kg"))
        .stdout(predicate::str::contains("Progress! +5kg from last time"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = setup_test_dir();
    let config_path = temp_dir.path().join("custom.toml");
    fs::write(&config_path, "[retention]\ndays = 100000000\n").unwrap();

    cli_with_config(temp_dir.path(), &config_path, "2024-01-03")
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("retention.days"));
}

#[test]
fn test_suggest_same_weight_below_target() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir, "2024-01-03")
        .args(["log", "squat", "--weight", "50", "--reps", "9"])
        .assert()
        .success();

    cli(data_dir, "2024-01-05")
        .args(["suggest", "squat", "--reps", "8-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Same weight, aim for 12 reps"));
}

#[test]
fn test_suggest_first_time() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), "2024-01-03")
        .args(["suggest", "overhead_press"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First time - start light!"));
}

#[test]
fn test_log_in_lbs_stores_kg() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir, "2024-01-03").args(["unit", "lbs"]).assert().success();

    cli(data_dir, "2024-01-03")
        .args(["log", "deadlift", "--weight", "22.1", "--reps", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("22.1 lbs"));

    let ledger = read_json(&data_dir.join("exercise_history.json"));
    assert_eq!(ledger["deadlift"][0]["weight"], 10.0);
    assert_eq!(ledger["deadlift"][0]["date"], "2024-01-03");
}

#[test]
fn test_same_day_log_overwrites() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for weight in ["60", "65"] {
        cli(data_dir, "2024-01-03")
            .args(["log", "row", "--weight", weight, "--reps", "8"])
            .assert()
            .success();
    }

    let ledger = read_json(&data_dir.join("exercise_history.json"));
    let series = ledger["row"].as_array().expect("series is an array");
    assert_eq!(series.len(), 1);
    assert_eq!(series[0]["weight"], 65.0);
}

#[test]
fn test_complete_upserts_today() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir, "2024-01-03")
        .args(["log", "bench_press", "--weight", "60", "--reps", "8", "--sets", "3"])
        .assert()
        .success();

    cli(data_dir, "2024-01-03")
        .args(["complete", "gym", "push", "--exercise", "bench_press", "--exercise", "dips"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout completed"))
        .stdout(predicate::str::contains("1/2 exercises"));

    cli(data_dir, "2024-01-03")
        .args(["complete", "gym", "pull"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout updated"));

    let history = read_json(&data_dir.join("workout_history.json"));
    let sessions = history.as_array().expect("history is an array");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["workout"], "pull");
    assert_eq!(sessions[0]["type"], "gym");
}

#[test]
fn test_today_and_redo() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir, "2024-01-03")
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout recorded"));

    cli(data_dir, "2024-01-03")
        .args(["complete", "run", "easy_5k"])
        .assert()
        .success();

    cli(data_dir, "2024-01-03")
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("easy_5k (run)"));

    cli(data_dir, "2024-01-03")
        .arg("redo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout reset"));

    cli(data_dir, "2024-01-03")
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("No workout recorded"));
}

#[test]
fn test_stats_streak() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        cli(data_dir, day)
            .args(["complete", "gym", "full_body"])
            .assert()
            .success();
    }

    cli(data_dir, "2024-01-03")
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total workouts:  3"))
        .stdout(predicate::str::contains("Current streak:  3"))
        .stdout(predicate::str::contains("Days since last: 0"));

    cli(data_dir, "2024-01-05")
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current streak:  0"))
        .stdout(predicate::str::contains("Days since last: 2"));
}

#[test]
fn test_stats_empty() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), "2024-01-03")
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total workouts:  0"))
        .stdout(predicate::str::contains("Days since last: -"));
}

#[test]
fn test_week_alternation() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for day in ["2024-01-03", "2024-01-05"] {
        cli(data_dir, day)
            .args(["week", "--variants", "push", "legs"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Week 2024-W01: legs"));
    }

    cli(data_dir, "2024-01-10")
        .args(["week", "--variants", "push", "legs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 2024-W02: push"));
}

#[test]
fn test_progress_view() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir, "2024-01-01")
        .args(["log", "squat", "--weight", "100", "--reps", "5"])
        .assert()
        .success();
    cli(data_dir, "2024-01-08")
        .args(["log", "squat", "--weight", "105", "--reps", "5"])
        .assert()
        .success();

    cli(data_dir, "2024-01-08")
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("Squat (2 sessions)"))
        .stdout(predicate::str::contains("+5 kg since start"));
}

#[test]
fn test_export_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let csv_path = data_dir.join("exports").join("ledger.csv");

    cli(data_dir, "2024-01-03")
        .args(["log", "squat", "--weight", "100", "--reps", "5", "--sets", "5"])
        .assert()
        .success();

    cli(data_dir, "2024-01-03")
        .arg("export")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 entries"));

    let contents = fs::read_to_string(&csv_path).expect("Failed to read CSV");
    assert!(contents.starts_with("exercise_id,date,weight_kg,reps,sets"));
    assert!(contents.contains("squat,2024-01-03,100.0,5,5"));
}

#[test]
fn test_reset_requires_confirmation() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli(data_dir, "2024-01-03")
        .args(["complete", "gym", "push"])
        .assert()
        .success();

    cli(data_dir, "2024-01-03")
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Refusing"));
    assert!(data_dir.join("workout_history.json").exists());

    cli(data_dir, "2024-01-03")
        .args(["reset", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All workout data cleared"));
    assert!(!data_dir.join("workout_history.json").exists());
}

#[test]
fn test_invalid_today_rejected() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path(), "2024-13-45").arg("stats").assert().failure();
}
