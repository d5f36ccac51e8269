//! End-to-end tests for CLI exit codes.
//!
//! - Exit code 0: Success
//! - Exit code 1: General error (bad path, bad configuration, failed pipeline step)
//! - Exit code 2: Invalid command-line usage (handled by clap)

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Exit code 0 is returned for successful operations.
#[test]
fn test_exit_code_success() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("repo/.git").create_dir_all().unwrap();

    let mut cmd = cargo_bin_cmd!("git-submodules");

    cmd.current_dir(temp.path())
        .arg("list-repos")
        .arg(".")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("repo"));
}

/// Exit code 0 is returned for --help.
#[test]
fn test_exit_code_help() {
    let mut cmd = cargo_bin_cmd!("git-submodules");

    cmd.arg("--help").assert().code(0);
}

/// Exit code 0 is returned for --version.
#[test]
fn test_exit_code_version() {
    let mut cmd = cargo_bin_cmd!("git-submodules");

    cmd.arg("--version")
        .assert()
        .code(0)
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Without a subcommand the help is printed and the usage error code returned.
#[test]
fn test_exit_code_no_subcommand() {
    let mut cmd = cargo_bin_cmd!("git-submodules");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"))
        .stderr(predicate::str::contains("create"));
}

/// Exit code 1 is returned for a scan path that does not exist.
#[test]
fn test_exit_code_error_missing_path() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("git-submodules");

    cmd.current_dir(temp.path())
        .arg("create")
        .arg("nonexistent")
        .env_remove("GIT_SUBMODULES_CONFIG")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Directory does not exist"));
}

/// Exit code 1 is returned for invalid YAML syntax.
#[test]
fn test_exit_code_error_invalid_yaml() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("scan").create_dir_all().unwrap();
    let config_file = temp.child("subs.yaml");
    config_file.write_str("skip_domains: [unclosed\n").unwrap();

    let mut cmd = cargo_bin_cmd!("git-submodules");

    cmd.current_dir(temp.path())
        .arg("--config")
        .arg(config_file.path())
        .arg("create")
        .arg("scan")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

/// Exit code 2 is returned for unknown subcommands.
#[test]
fn test_exit_code_invalid_subcommand() {
    let mut cmd = cargo_bin_cmd!("git-submodules");

    cmd.arg("register").assert().code(2);
}

/// Exit code 2 is returned for a non-numeric timeout.
#[test]
fn test_exit_code_invalid_timeout() {
    let temp = assert_fs::TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("git-submodules");

    cmd.current_dir(temp.path())
        .arg("create")
        .arg(".")
        .arg("--timeout")
        .arg("soon")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'soon'"));
}

/// Exit code 2 is returned for an unknown log level.
#[test]
fn test_exit_code_invalid_log_level() {
    let mut cmd = cargo_bin_cmd!("git-submodules");

    cmd.arg("--log-level")
        .arg("loud")
        .arg("list-submodules")
        .assert()
        .code(2);
}
