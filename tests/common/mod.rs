//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, helper functions, and macros
//! to reduce duplication across test files.
//!
//! ## Layout
//!
//! A [`TestFixture`] owns a temporary directory with two children:
//!
//! - `work/`: the superproject, used as the command's current directory
//! - `scan/`: the tree of repositories passed to `create` or `list-repos`
//!
//! They are siblings so that the inventory walk of `work/` never sees the
//! repositories being scanned.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_superproject()
//!         .with_candidate("z", "https://b/z.git");
//!     fixture.create().write_stdin("c\n").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::{git, git_available};
    pub use super::TestFixture;
}

/// Configuration YAML snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// No skip domains at all.
    pub const NO_SKIP: &str = "skip_domains: []\n";

    /// Skips one corporate host and uses a custom archive directory.
    pub const CORPORATE: &str = r#"
skip_domains:
  - "git\\.corp\\.example"
archive_dir: attic
"#;

    /// A skip-domain pattern that is not a valid regular expression.
    pub const INVALID_PATTERN: &str = r#"
skip_domains:
  - "(unclosed"
"#;

    /// Unknown key.
    pub const UNKNOWN_KEY: &str = "skip_domain: [x]\n";
}

/// Whether a `git` binary can be run.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// Run git in `dir` with a fixed identity, panicking on failure.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args([
            "-c",
            "user.name=Test",
            "-c",
            "user.email=test@example.com",
            "-c",
            "init.defaultBranch=main",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A temporary superproject directory and a directory of repositories to scan.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with empty `work/` and `scan/` directories.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("work")
            .create_dir_all()
            .expect("Failed to create work directory");
        temp_dir
            .child("scan")
            .create_dir_all()
            .expect("Failed to create scan directory");
        Self { temp_dir }
    }

    /// Mark `work/` as a repository so `create` does not run `git init`.
    pub fn with_superproject(self) -> Self {
        self.work_child(".git")
            .create_dir_all()
            .expect("Failed to create .git directory");
        self
    }

    /// Add a repository under `scan/<dir>` whose origin is `url`.
    pub fn with_candidate(self, dir: &str, url: &str) -> Self {
        self.temp_dir
            .child("scan")
            .child(dir)
            .child(".git/config")
            .write_str(&remote_config(url))
            .expect("Failed to write candidate config");
        self
    }

    /// Record `url` as the remote of submodule `name` in `work/.git/modules`.
    #[allow(dead_code)]
    pub fn with_registered(self, name: &str, url: &str) -> Self {
        self.work_child(".git/modules")
            .child(name)
            .child("config")
            .write_str(&remote_config(url))
            .expect("Failed to write submodule config");
        self
    }

    /// Add `work/.git-submodules.yaml`.
    #[allow(dead_code)]
    pub fn with_config(self, content: &str) -> Self {
        self.work_child(".git-submodules.yaml")
            .write_str(content)
            .expect("Failed to write config file");
        self
    }

    /// Add a file under `work/`.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.work_child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Path of the superproject.
    pub fn work_path(&self) -> PathBuf {
        self.temp_dir.path().join("work")
    }

    /// Path of the directory to scan.
    pub fn scan_path(&self) -> PathBuf {
        self.temp_dir.path().join("scan")
    }

    /// Get the path to the temporary directory.
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A child path under `work/`.
    pub fn work_child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child("work").child(path)
    }

    /// Create a command running in `work/` with plain output and no user config.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("git-submodules");
        cmd.current_dir(self.work_path())
            .env("NO_COLOR", "1")
            .env("XDG_CONFIG_HOME", self.temp_dir.path())
            .env_remove("CLICOLOR_FORCE")
            .env_remove("GIT_SUBMODULES_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// `git-submodules create <scan>`
    #[allow(dead_code)]
    pub fn create(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("create").arg(self.scan_path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn remote_config(url: &str) -> String {
    format!(
        "[core]\n\trepositoryformatversion = 0\n\tbare = false\n\
         [remote \"origin\"]\n\turl = {}\n\tfetch = +refs/heads/*:refs/remotes/origin/*\n",
        url
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_work_and_scan() {
        let fixture = TestFixture::new();
        assert!(fixture.work_path().is_dir());
        assert!(fixture.scan_path().is_dir());
    }

    #[test]
    fn test_fixture_with_candidate() {
        let fixture = TestFixture::new().with_candidate("z", "https://b/z.git");
        let config = fixture.scan_path().join("z/.git/config");
        let content = std::fs::read_to_string(config).unwrap();
        assert!(content.contains("\turl = https://b/z.git\n"));
    }

    #[test]
    fn test_configs_are_valid_yaml() {
        for config in [configs::NO_SKIP, configs::CORPORATE, configs::INVALID_PATTERN] {
            serde_yaml::from_str::<serde_yaml::Value>(config).expect("Config should be valid YAML");
        }
    }
}
