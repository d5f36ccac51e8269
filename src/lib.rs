//! # Git Submodules Library
//!
//! This library scans a directory tree for independent git repositories and
//! registers each one as a submodule of the repository in the working
//! directory, asking the operator how to name and place it. It also lists,
//! moves and deletes submodules that are already registered.
//!
//! It is used by the `git-submodules` command-line tool; the operator
//! interaction and the git invocations sit behind traits, so the workflow can
//! be driven from other code (or tests) as well.
//!
//! ## Quick Example
//!
//! ```
//! use git_submodules::config;
//! use git_submodules::registrar::{default_destination, destination};
//!
//! let config = config::parse("skip_domains: [gatech.edu]\narchive_dir: old\n").unwrap();
//! let skip = config.skip_domains().unwrap();
//! assert_eq!(skip.matching("https://github.gatech.edu/t/y.git"), Some("gatech.edu"));
//! assert_eq!(skip.matching("https://b/z.git"), None);
//!
//! let name = default_destination("https://host/group/project.git");
//! assert_eq!(name, "project");
//! assert_eq!(destination(&name, true, &config.archive_dir), "old/project");
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: skip domains, cancel token, archive
//!   directory and timeout, read from `.git-submodules.yaml`.
//! - **Discovery (`discovery`)**: the URLs already registered under the
//!   working directory, and the candidate repositories under a target path.
//! - **Git (`git`)**: the [`git::GitRunner`] seam and the process-backed
//!   [`git::SystemGit`], including the timeout on `git submodule add`.
//! - **Prompts (`prompt`)**: the [`prompt::Prompter`] seam with terminal and
//!   line-based implementations.
//! - **Registrar (`registrar`)**: the per-candidate decision sequence.
//! - **Pipelines (`pipeline`)**: the named steps that delete or move a
//!   submodule, halting at the first failure.
//!
//! ## Execution Flow
//!
//! [`registrar::Registrar::register_all`] runs the whole workflow:
//!
//! 1.  **Initialization**: `git init` if the working directory is not a repository.
//! 2.  **Inventory**: collect the URLs already registered.
//! 3.  **Discovery**: walk the target for repositories and their remote URLs.
//! 4.  **Decision**: skip known and skip-domain URLs, prompt for the rest, and
//!     run `git submodule add` under a timeout.

pub mod config;
pub mod defaults;
pub mod discovery;
pub mod error;
pub mod git;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod registrar;
pub mod suggestions;

#[cfg(test)]
mod naming_proptest;
