//! Integration tests for the clicktally command line.

#![allow(clippy::unwrap_used)]

mod common;

use assert_cmd::cargo::cargo_bin;
use assert_cmd::prelude::*;
use common::write_impulse_wav;
use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn clicktally() -> Command {
    let mut cmd = Command::new(cargo_bin("clicktally"));
    cmd.env_remove("CLICKTALLY_CONFIG")
        .env_remove("CLICKTALLY_METADATA_ROOT")
        .env_remove("CLICKTALLY_JOBS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_stages() {
    clicktally()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("detect"))
        .stdout(predicate::str::contains("aggregate"))
        .stdout(predicate::str::contains("join"))
        .stdout(predicate::str::contains("compare"));
}

#[test]
fn test_config_path_honours_flag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");

    clicktally()
        .args(["config", "path", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/config.toml");

    clicktally()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(path.exists());

    clicktally()
        .args(["config", "init", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));

    clicktally()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("short_term_duration = 0.005"))
        .stdout(predicate::str::contains("window_size = 1.0"));
}

#[test]
fn test_malformed_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[detection\nthreshold = ").unwrap();

    clicktally()
        .env("CLICKTALLY_CONFIG", &path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("threshold = 0.005"))
        .stderr(predicate::str::contains("using default configuration"));
}

#[test]
fn test_detect_missing_experiment_fails() {
    let dir = TempDir::new().unwrap();

    clicktally()
        .arg("detect")
        .arg(dir.path().join("nowhere"))
        .arg("--metadata-root")
        .arg(dir.path())
        .arg("--config")
        .arg(dir.path().join("none.toml"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: directory not found"));
}

#[test]
fn test_aggregate_rejects_unknown_source() {
    clicktally()
        .args(["aggregate", "somewhere_else"])
        .assert()
        .failure();
}

#[test]
fn test_stage_by_stage_commands() {
    let dir = TempDir::new().unwrap();
    let experiment = dir.path().join("exp1");
    write_impulse_wav(&experiment.join("trial_1/seg_01.wav"), 4.0, &[2.5]);
    let metadata_root = dir.path().join("metadata");
    let config = dir.path().join("config.toml");

    let stage = |args: &[&str]| {
        clicktally()
            .args(args)
            .arg("--metadata-root")
            .arg(&metadata_root)
            .arg("--config")
            .arg(&config)
            .arg("--no-progress")
            .assert()
            .success();
    };

    stage(&["detect", experiment.to_str().unwrap(), "--jobs", "1"]);
    stage(&["aggregate", "model_detections"]);
    stage(&["join", "model", "--window-size", "1"]);

    let trial = metadata_root.join("model_detections/exp1/trial_1");
    assert_eq!(
        std::fs::read_to_string(trial.join("seg_01_aggregated.csv")).unwrap(),
        "start_time_sec,event_count\n0.0,0\n1.0,0\n2.0,1\n"
    );
    assert_eq!(
        std::fs::read_to_string(trial.join("trial_1_joint.csv")).unwrap(),
        "start_time_sec,event_count,segment\n0.0,0,seg_01\n1.0,0,seg_01\n2.0,,seg_01\n"
    );
}

#[test]
fn test_run_quiet_has_no_info_logs() {
    let dir = TempDir::new().unwrap();
    let experiment = dir.path().join("exp1");
    write_impulse_wav(&experiment.join("trial_1/seg_01.wav"), 2.0, &[]);

    clicktally()
        .arg("run")
        .arg(&experiment)
        .arg("--metadata-root")
        .arg(dir.path().join("metadata"))
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("-q")
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO").not());
}
