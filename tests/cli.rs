use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Binary-level checks. None of these reach an external tool: an empty
/// chart list means nothing is queried.

fn helm_updater(workspace: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("helm-updater").unwrap();
    cmd.env_clear()
        .env("HOME", workspace.path())
        .env("WORKING_DIRECTORY", workspace.path());
    cmd
}

#[test]
fn test_help_lists_commands() {
    let workspace = TempDir::new().unwrap();
    helm_updater(&workspace)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("digests"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_empty_chart_list_is_a_no_op() {
    let workspace = TempDir::new().unwrap();
    let chart_file = workspace.path().join("charts.yaml");
    fs::write(&chart_file, "[]\n").unwrap();

    helm_updater(&workspace)
        .assert()
        .success()
        .stderr(predicate::str::contains("No newer versions found"));

    assert_eq!(fs::read_to_string(&chart_file).unwrap(), "[]\n");
    assert!(!workspace.path().join("images.yaml").exists());
}

#[test]
fn test_custom_chart_file_name() {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join("helm-charts.yaml"), "[]\n").unwrap();

    helm_updater(&workspace)
        .env("CHART_FILE", "helm-charts.yaml")
        .assert()
        .success();
}

#[test]
fn test_missing_chart_file_fails() {
    let workspace = TempDir::new().unwrap();

    helm_updater(&workspace)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_check_reports_up_to_date() {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join("charts.yaml"), "[]\n").unwrap();

    helm_updater(&workspace)
        .args(["check", "--format", "table"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All charts are up to date."));
}

#[test]
fn test_malformed_config_file_fails() {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join("charts.yaml"), "[]\n").unwrap();
    fs::write(workspace.path().join(".helm-updater.toml"), "[pull_request\n").unwrap();

    helm_updater(&workspace)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse configuration"));
}

fn empty_workspace() -> TempDir {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join("charts.yaml"), "[]\n").unwrap();
    workspace
}

#[test]
fn test_switches_accept_any_non_falsey_value() {
    for (name, value) in [
        ("NO_WRITE", "1"),
        ("NO_WRITE", "yes"),
        ("NO_PR", "1"),
        ("NO_PR", "yes"),
        ("DIGESTS_ONLY", "1"),
        ("DIGESTS_ONLY", "true"),
    ] {
        let workspace = empty_workspace();
        helm_updater(&workspace)
            .env(name, value)
            .assert()
            .success()
            .code(0);
    }
}

#[test]
fn test_empty_or_falsey_switches_are_off() {
    for (name, value) in [
        ("NO_WRITE", ""),
        ("NO_PR", ""),
        ("DIGESTS_ONLY", ""),
        ("NO_WRITE", "false"),
        ("NO_PR", "false"),
        ("DIGESTS_ONLY", "false"),
    ] {
        let workspace = empty_workspace();
        helm_updater(&workspace)
            .env(name, value)
            .assert()
            .success()
            .stderr(predicate::str::contains("No newer versions found"));

        assert!(!workspace.path().join("images.yaml").exists());
    }
}

#[test]
fn test_digests_only_from_environment() {
    let workspace = empty_workspace();

    helm_updater(&workspace)
        .env("DIGESTS_ONLY", "1")
        .assert()
        .success()
        .stderr(predicate::str::contains("No images found, nothing to commit"))
        .stderr(predicate::str::contains("No newer versions found").not());

    assert_eq!(
        fs::read_to_string(workspace.path().join("images.yaml")).unwrap(),
        "[]\n"
    );
}

#[test]
fn test_switch_flags_on_command_line() {
    let workspace = empty_workspace();

    helm_updater(&workspace)
        .args(["--digests-only", "--no-pr"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No images found, nothing to commit"));
}
