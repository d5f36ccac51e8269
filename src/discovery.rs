//! # Repository Discovery
//!
//! Filesystem side of the registrar. Two walks happen before any prompt is
//! shown:
//!
//! 1.  **Inventory (`known_urls`)**: walk the working directory and collect the
//!     remote URLs already recorded in any `config` file living under a `.git`
//!     directory. This covers the superproject's own remotes as well as the
//!     per-submodule configs under `.git/modules/`.
//!
//! 2.  **Candidates (`discover_candidates`)**: walk the target path and, for
//!     every directory holding a `.git` directory, read the remote URLs from
//!     its `.git/config`.
//!
//! Both use plain line-prefix matching rather than a git config parser, and
//! the two prefixes differ: the inventory accepts only `"\turl = "` while
//! candidate discovery accepts any line starting with `"\turl"`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::defaults::{CANDIDATE_URL_PREFIX, GIT_CONFIG_FILE, KNOWN_URL_PREFIX, METADATA_DIR};
use crate::error::{Error, Result};

/// A repository found under the scan target, one per remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Directory containing the `.git` directory.
    pub path: PathBuf,
    /// Remote URL read from `.git/config`.
    pub url: String,
}

/// Extract the URLs of `"\turl = <value>"` lines.
pub fn parse_known_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| line.strip_prefix(KNOWN_URL_PREFIX))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Extract the URLs of lines starting with `"\turl"`.
///
/// The URL is whatever follows the first `=`. Lines without `=` are ignored.
pub fn parse_candidate_urls(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| line.starts_with(CANDIDATE_URL_PREFIX))
        .filter_map(|line| line.split_once('='))
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Collect the remote URLs already registered below `root`.
pub fn known_urls(root: &Path) -> Result<HashSet<String>> {
    let mut urls = HashSet::new();

    for entry in walk(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(Error::Walk(err)),
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() || entry.file_name() != GIT_CONFIG_FILE {
            continue;
        }
        if !inside_metadata_dir(root, entry.path()) {
            continue;
        }

        debug!("Found config file: {}", entry.path().display());
        match fs::read_to_string(entry.path()) {
            Ok(content) => urls.extend(parse_known_urls(&content)),
            Err(err) => warn!("Cannot read {}: {}", entry.path().display(), err),
        }
    }

    debug!("{} URL(s) already registered", urls.len());
    Ok(urls)
}

/// Find every repository below `target` and the remote URLs it declares.
///
/// Candidates come out in walk order (directory entries sorted by name) and,
/// within one repository, in the order its config lists them.
pub fn discover_candidates(target: &Path) -> Result<Vec<Candidate>> {
    let mut candidates = Vec::new();

    for repo in list_repositories(target)? {
        let config = repo.join(METADATA_DIR).join(GIT_CONFIG_FILE);
        let content = match fs::read_to_string(&config) {
            Ok(content) => content,
            Err(err) => {
                warn!("Cannot read {}: {}", config.display(), err);
                continue;
            }
        };

        let urls = parse_candidate_urls(&content);
        if urls.is_empty() {
            debug!("{} has no remote URL", repo.display());
        }
        candidates.extend(urls.into_iter().map(|url| Candidate {
            path: repo.clone(),
            url,
        }));
    }

    Ok(candidates)
}

/// List every directory below `target` (inclusive) that holds a `.git` directory.
pub fn list_repositories(target: &Path) -> Result<Vec<PathBuf>> {
    let mut repos = Vec::new();

    let walker = walk(target)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != METADATA_DIR);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(Error::Walk(err)),
            Err(err) => {
                warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if entry.file_type().is_dir() && is_repository(&entry) {
            debug!("Found repository: {}", entry.path().display());
            repos.push(entry.into_path());
        }
    }

    Ok(repos)
}

fn walk(root: &Path) -> WalkDir {
    WalkDir::new(root).sort_by_file_name()
}

fn is_repository(entry: &DirEntry) -> bool {
    entry.path().join(METADATA_DIR).is_dir()
}

fn inside_metadata_dir(root: &Path, file: &Path) -> bool {
    let relative = file.strip_prefix(root).unwrap_or(file);
    relative
        .parent()
        .is_some_and(|dir| dir.components().any(|c| c.as_os_str() == METADATA_DIR))
}
