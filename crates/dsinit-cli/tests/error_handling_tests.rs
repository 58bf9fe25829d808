//! Tests for exit codes and error reporting.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn dsinit(home: &TempDir, cwd: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("dsinit");
    cmd.current_dir(cwd)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("xdg"))
        .env("NO_COLOR", "1")
        .env_remove("CONDA_PREFIX")
        .env_remove("RUST_LOG");
    cmd
}

fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_no_arguments_prints_usage_and_fails() {
    let home = TempDir::new().unwrap();
    dsinit(&home, home.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_required_name_fails() {
    let home = TempDir::new().unwrap();
    dsinit(&home, home.path())
        .arg("setup")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("<NAME>"));
}

#[test]
fn test_unknown_script_kind_fails() {
    let home = TempDir::new().unwrap();
    dsinit(&home, home.path())
        .args(["new-script", "eda", "rb"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown script kind"));
}

#[test]
fn test_empty_name_creates_nothing() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    for name in ["", "   "] {
        dsinit(&home, work.path())
            .args(["setup", name])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::starts_with("✗ Invalid name"));
    }
    assert_eq!(entries(work.path()), 0);
}

#[test]
fn test_path_like_name_is_rejected() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    dsinit(&home, work.path())
        .args(["scaffold", "../escape"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid name"));
    assert_eq!(entries(work.path()), 0);
}

#[test]
fn test_snapshot_into_missing_directory_fails() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    dsinit(&home, work.path())
        .args(["snapshot", "nope"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Directory not found"));
}

#[test]
fn test_missing_vcs_tool_halts_setup() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(
        work.path().join(".dsinit.toml"),
        "[snapshot]\nprimary_command = [\"true\"]\n\n[setup]\ngit_binary = \"dsinit-no-such-git\"\n",
    )
    .unwrap();

    dsinit(&home, work.path())
        .args(["setup", "demo"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "✗ version-control init step failed: Could not run `dsinit-no-such-git init",
        ));

    let root = work.path().join("demo");
    assert!(root.join("README.md").is_file());
    assert!(!root.join("src/logging_setup.py").exists());
}

#[test]
fn test_verbose_error_shows_suggestions() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    dsinit(&home, work.path())
        .args(["-v", "snapshot", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Suggestions:"))
        .stderr(predicate::str::contains("mkdir -p"));
}

#[test]
fn test_quiet_error_is_single_line() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    let assert = dsinit(&home, work.path())
        .args(["-q", "snapshot", "nope"])
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert_eq!(stderr.lines().count(), 1);
    assert!(stderr.starts_with("✗ Directory not found"));
}

#[test]
fn test_explicit_config_file_must_exist() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    dsinit(&home, work.path())
        .args(["--config", "missing.toml", "config", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_script_mode_without_script_is_config_error() {
    let home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    fs::write(work.path().join(".dsinit.toml"), "[setup]\nvcs = \"script\"\n").unwrap();

    dsinit(&home, work.path())
        .args(["setup", "demo"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("setup.script must be set"));
    assert!(!work.path().join("demo").exists());
}
