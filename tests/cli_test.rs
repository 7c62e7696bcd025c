//! CLI smoke tests.

use std::io::Write;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn test_json_output_for_benign_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(b"just some notes\n").unwrap();

    let output = Command::cargo_bin("sift")
        .unwrap()
        .args(["--json", "--no-quarantine"])
        .arg(&path)
        .timeout(Duration::from_secs(30))
        .output()
        .expect("failed to run sift");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_start = stdout.find('[').expect("should find JSON array start");
    let reports: Value = serde_json::from_str(&stdout[json_start..]).expect("valid JSON");

    let reports = reports.as_array().expect("JSON array");
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["verdict"], "clean");
    assert_eq!(reports[0]["risk_score"], 0);
}

#[test]
fn test_text_output_shows_verdict_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, b"hello\n").unwrap();

    Command::cargo_bin("sift")
        .unwrap()
        .arg("--no-quarantine")
        .arg(&path)
        .timeout(Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("clean"))
        .stdout(predicate::str::contains("1 scanned"));
}

#[test]
fn test_unscannable_file_counted_as_failed_not_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no-such-file.bin");

    Command::cargo_bin("sift")
        .unwrap()
        .arg("--no-quarantine")
        .arg(&missing)
        .timeout(Duration::from_secs(30))
        .assert()
        .success()
        .stdout(predicate::str::contains("0 skipped"))
        .stdout(predicate::str::contains("1 failed"))
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_argument_fails() {
    Command::cargo_bin("sift")
        .unwrap()
        .timeout(Duration::from_secs(30))
        .assert()
        .failure();
}
