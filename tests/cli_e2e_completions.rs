//! End-to-end tests for the `git-submodules completions` command.

#[allow(dead_code)]
mod common;
#[allow(unused_imports)]
use common::prelude::*;

#[test]
fn test_completions_help() {
    let mut cmd = cargo_bin_cmd!("git-submodules");
    cmd.arg("completions")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate shell completion scripts"))
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("zsh"))
        .stdout(predicate::str::contains("fish"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("git-submodules");
    cmd.arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("_git__submodules()"))
        .stdout(predicate::str::contains("complete -F _git__submodules"))
        .stdout(predicate::str::contains("git-submodules"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("list-submodules"));
}

#[test]
fn test_completions_zsh() {
    let mut cmd = cargo_bin_cmd!("git-submodules");
    cmd.arg("completions")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef git-submodules"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_completions_fish() {
    let mut cmd = cargo_bin_cmd!("git-submodules");
    cmd.arg("completions")
        .arg("fish")
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c git-submodules"));
}

#[test]
fn test_completions_invalid_shell() {
    let mut cmd = cargo_bin_cmd!("git-submodules");
    cmd.arg("completions")
        .arg("tcsh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'tcsh'"));
}
