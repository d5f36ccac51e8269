//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `git-submodules` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `git_submodules` library.

pub mod completions;
pub mod create;
pub mod delete;
pub mod list_repos;
pub mod list_submodules;
pub mod mv;

use std::path::{Path, PathBuf};

use anyhow::Result;

use git_submodules::git::{self, GitRunner, Submodule, SystemGit};
use git_submodules::suggestions;

/// A git runner for the current directory, which must be a repository root.
fn repository_root() -> Result<SystemGit> {
    let dir: PathBuf = std::env::current_dir()?;
    if !git::has_repository(&dir) {
        return Err(suggestions::not_a_repository(&dir));
    }
    Ok(SystemGit::new(dir))
}

/// The declared submodule whose name or path is `name`.
fn ensure_submodule(git: &dyn GitRunner, name: &str) -> Result<Submodule> {
    let wanted = Path::new(name.trim_end_matches('/'));
    let submodules = git::list_submodules(git)?;
    if let Some(found) = submodules
        .iter()
        .find(|s| Path::new(&s.path) == wanted || Path::new(&s.name) == wanted)
    {
        return Ok(found.clone());
    }

    let known: Vec<&str> = submodules.iter().map(|s| s.path.as_str()).collect();
    Err(suggestions::unknown_submodule(name, &known))
}
