//! # Configuration
//!
//! Registrar settings, read from a small YAML document:
//!
//! ```yaml
//! skip_domains: ["gatech.edu", "git.overleaf.com"]
//! cancel_token: c
//! archive_dir: old
//! timeout_secs: 10
//! ```
//!
//! Every key is optional and falls back to the values in
//! [`crate::defaults`]. [`load`] resolves which file (if any) to read, and
//! [`SkipDomains`] is the compiled form of `skip_domains` used for matching.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::defaults::{
    user_config_path, DEFAULT_ADD_TIMEOUT_SECS, DEFAULT_ARCHIVE_DIR, DEFAULT_CANCEL_TOKEN,
    DEFAULT_CONFIG_FILENAME, DEFAULT_SKIP_DOMAINS,
};
use crate::error::{Error, Result};

/// Registrar settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Regex patterns searched for in candidate URLs; any match skips the URL.
    pub skip_domains: Vec<String>,
    /// Answer to the name prompt that skips the candidate.
    pub cancel_token: String,
    /// Directory old repositories are registered under.
    pub archive_dir: String,
    /// Seconds a `git submodule add` may run.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_domains: DEFAULT_SKIP_DOMAINS.iter().map(|d| d.to_string()).collect(),
            cancel_token: DEFAULT_CANCEL_TOKEN.to_string(),
            archive_dir: DEFAULT_ARCHIVE_DIR.to_string(),
            timeout_secs: DEFAULT_ADD_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Time limit for a single `git submodule add`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Compile the skip-domain patterns.
    pub fn skip_domains(&self) -> Result<SkipDomains> {
        SkipDomains::new(&self.skip_domains)
    }

    /// Check the values that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(Error::ConfigParse {
                message: "timeout_secs must be greater than zero".to_string(),
                hint: Some("Use a value such as 10 (seconds)".to_string()),
            });
        }
        if self.cancel_token.trim().is_empty() {
            return Err(Error::ConfigParse {
                message: "cancel_token must not be empty".to_string(),
                hint: Some("An empty answer already means 'keep the default name'".to_string()),
            });
        }
        let archive = self.archive_dir.trim_matches('/');
        if archive.is_empty() {
            return Err(Error::ConfigParse {
                message: "archive_dir must not be empty".to_string(),
                hint: None,
            });
        }
        self.skip_domains()?;
        Ok(())
    }
}

/// Parses a YAML string into a validated [`Config`].
///
/// An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<Config> {
    let config = if yaml_content.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str::<Config>(yaml_content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(
                "Known keys are skip_domains, cancel_token, archive_dir and timeout_secs"
                    .to_string(),
            ),
        })?
    };
    config.validate()?;
    Ok(config)
}

/// Parse a [`Config`] from a YAML file path
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Resolve and load the configuration.
///
/// An explicit path must exist. Without one, `./.git-submodules.yaml` and then
/// the user configuration file are tried; if neither exists the defaults are
/// used. Returns the file the configuration came from, if any.
pub fn load(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(Error::Path {
                path: path.display().to_string(),
                message: "configuration file not found".to_string(),
            });
        }
        return Ok((from_file(path)?, Some(path.to_path_buf())));
    }

    let candidates = std::iter::once(PathBuf::from(DEFAULT_CONFIG_FILENAME)).chain(user_config_path());
    for path in candidates {
        if path.is_file() {
            debug!("Loading configuration from {}", path.display());
            return Ok((from_file(&path)?, Some(path)));
        }
    }

    debug!("No configuration file found, using defaults");
    Ok((Config::default(), None))
}

/// Compiled skip-domain patterns, kept in configuration order.
#[derive(Debug, Clone, Default)]
pub struct SkipDomains {
    patterns: Vec<(String, Regex)>,
}

impl SkipDomains {
    /// Compile each pattern as a regular expression.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let pattern = p.as_ref().to_string();
                Regex::new(&pattern)
                    .map(|re| (pattern.clone(), re))
                    .map_err(|source| Error::SkipDomain { pattern, source })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The first pattern found anywhere in `url`, if any.
    pub fn matching(&self, url: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(url))
            .map(|(pattern, _)| pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
