//! Binary tests for the command line flags

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::common::fixtures::{write_script, SCRIPT_WITHOUT_CALL_JSON};

fn concierge(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("concierge").expect("binary");
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd
}

#[test]
fn test_list_scripts() {
    let dir = TempDir::new().unwrap();
    concierge(&dir)
        .arg("--list-scripts")
        .assert()
        .success()
        .stdout(predicate::str::contains("triage\n"))
        .stdout(predicate::str::contains("triage-free-rating\n"));
}

#[test]
fn test_check_default_builtin() {
    let dir = TempDir::new().unwrap();
    concierge(&dir)
        .arg("--check")
        .assert()
        .success()
        .stdout(predicate::str::contains("script: triage"))
        .stdout(predicate::str::contains("mode: scripted"))
        .stdout(predicate::str::contains("steps: 56"))
        .stdout(predicate::str::contains("phone call: yes"));

    // First run leaves a config file and a log directory behind
    assert!(dir.path().join("config.toml").exists());
    assert!(dir.path().join("logs").is_dir());
}

#[test]
fn test_check_with_mode_override() {
    let dir = TempDir::new().unwrap();
    concierge(&dir)
        .args(["--check", "--builtin", "triage-free-rating", "--mode", "scripted"])
        .assert()
        .success()
        .stdout(predicate::str::contains("script: triage-free-rating"))
        .stdout(predicate::str::contains("mode: scripted"));
}

#[test]
fn test_check_script_file() {
    let dir = TempDir::new().unwrap();
    let path = write_script(dir.path(), "script.json", SCRIPT_WITHOUT_CALL_JSON);
    concierge(&dir)
        .arg("--check")
        .arg("--script")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("script: file-script"))
        .stdout(predicate::str::contains("title: Консьерж"))
        .stdout(predicate::str::contains("phone call: no"));
}

#[test]
fn test_invalid_script_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_script(
        dir.path(),
        "bad.json",
        r#"{ "name": "bad", "steps": [
            { "id": 2, "kind": "bot-text", "text": "a" },
            { "id": 1, "kind": "bot-text", "text": "b" }
        ] }"#,
    );
    concierge(&dir)
        .arg("--check")
        .arg("--script")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load script"))
        .stderr(predicate::str::contains("ids must strictly increase"));
}

#[test]
fn test_unknown_builtin_fails() {
    let dir = TempDir::new().unwrap();
    concierge(&dir)
        .args(["--check", "--builtin", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown built-in script: nope"));
}

#[test]
fn test_conflicting_sources_rejected() {
    let dir = TempDir::new().unwrap();
    concierge(&dir)
        .args(["--script", "a.json", "--builtin", "triage"])
        .assert()
        .failure();
}
