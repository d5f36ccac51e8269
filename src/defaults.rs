//! Default values for git-submodules configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Name of the per-repository git metadata directory.
pub const METADATA_DIR: &str = ".git";

/// Name of the configuration file inside a metadata directory.
pub const GIT_CONFIG_FILE: &str = "config";

/// Prefix of a `url` line when taking the inventory of registered URLs.
pub const KNOWN_URL_PREFIX: &str = "\turl = ";

/// Prefix of a `url` line when reading a candidate repository's remotes.
///
/// Broader than [`KNOWN_URL_PREFIX`]: it also accepts `url=` and keys that
/// merely start with `url`.
pub const CANDIDATE_URL_PREFIX: &str = "\turl";

/// Domains whose repositories are never registered.
pub const DEFAULT_SKIP_DOMAINS: &[&str] = &[
    "gatech.edu",
    "git.overleaf.com",
    "gtnoise.net",
    "openflowswitch.org",
    "strozfriedberg.com",
];

/// Answer to the name prompt that skips the current candidate.
pub const DEFAULT_CANCEL_TOKEN: &str = "c";

/// Directory that old repositories are registered under.
pub const DEFAULT_ARCHIVE_DIR: &str = "old";

/// Seconds a `git submodule add` may run before it is killed.
pub const DEFAULT_ADD_TIMEOUT_SECS: u64 = 10;

/// Configuration file looked up in the current directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".git-submodules.yaml";

/// Returns the user-level configuration file path.
///
/// Uses the platform-appropriate configuration directory:
/// - Linux: `~/.config/git-submodules/config.yaml`
/// - macOS: `~/Library/Application Support/git-submodules/config.yaml`
/// - Windows: `{FOLDERID_RoamingAppData}\git-submodules\config.yaml`
///
/// Returns `None` when the platform directory cannot be determined.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("git-submodules").join("config.yaml"))
}
