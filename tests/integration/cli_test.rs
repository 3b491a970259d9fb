//! CLI tests driving the built binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::SvgFixtures;

/// The binary with HOME pointed at a scratch directory.
fn fbfsvg(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fbfsvg").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    fbfsvg(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("thumbs"))
        .stdout(predicate::str::contains("placeholder"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    fbfsvg(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("fbfsvg "));
}

#[test]
fn placeholder_defaults_to_spinner() {
    let home = TempDir::new().unwrap();
    fbfsvg(&home)
        .args(["placeholder", "--cell", "12"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<svg"))
        .stdout(predicate::str::contains("loadRing_12"))
        .stdout(predicate::str::contains("Loading..."));
}

#[test]
fn placeholder_error_state() {
    let home = TempDir::new().unwrap();
    fbfsvg(&home)
        .args(["placeholder", "--state", "error", "-W", "120", "-H", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"width="120" height="90""#))
        .stdout(predicate::str::contains(">Error<"));
}

#[test]
fn placeholder_rejects_bad_size() {
    let home = TempDir::new().unwrap();
    fbfsvg(&home)
        .args(["placeholder", "-W", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}

#[test]
fn config_path_uses_home() {
    let home = TempDir::new().unwrap();
    fbfsvg(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".config"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    fbfsvg(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[thumbnails]"))
        .stdout(predicate::str::contains("max_entries = 100"))
        .stdout(predicate::str::contains("[gallery]"));
}

#[test]
fn thumbs_reports_json() {
    let home = TempDir::new().unwrap();
    let fixtures = SvgFixtures::new(3);
    fixtures.write("broken.svg", "plain text");

    let output = fbfsvg(&home)
        .args(["thumbs", "--json", "-W", "64", "-H", "64"])
        .arg(fixtures.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 4);

    let states: Vec<&str> = reports
        .iter()
        .map(|r| r["state"].as_str().unwrap())
        .collect();
    assert_eq!(states, vec!["error", "ready", "ready", "ready"]);
    assert!(reports[0]["error"].is_string());
}

#[test]
fn thumbs_table_output() {
    let home = TempDir::new().unwrap();
    let fixtures = SvgFixtures::new(2);

    fbfsvg(&home)
        .arg("thumbs")
        .arg(fixtures.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("STATE"))
        .stdout(predicate::str::contains("thumb_000.svg"))
        .stdout(predicate::str::contains("2 ready, 0 failed"));
}

#[test]
fn thumbs_empty_directory() {
    let home = TempDir::new().unwrap();
    let empty = TempDir::new().unwrap();
    fbfsvg(&home)
        .arg("thumbs")
        .arg(empty.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No SVG files found"));
}

#[test]
fn thumbs_rejects_infinite_size() {
    let home = TempDir::new().unwrap();
    let fixtures = SvgFixtures::new(1);
    fbfsvg(&home)
        .args(["thumbs", "-W", "inf", "--timeout-ms", "60000"])
        .arg(fixtures.path())
        .timeout(std::time::Duration::from_secs(20))
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be positive"));
}

#[test]
fn thumbs_missing_directory_fails() {
    let home = TempDir::new().unwrap();
    fbfsvg(&home)
        .args(["thumbs", "/definitely/not/a/real/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to scan gallery directory"));
}
