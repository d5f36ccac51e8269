//! # Submodule Registrar
//!
//! Turns the repositories found under a directory into submodules of the
//! repository in the working directory.
//!
//! ## Process
//!
//! 1.  **Initialization**: run `git init` if the working directory has no
//!     `.git` yet.
//! 2.  **Inventory**: collect the URLs already registered anywhere under the
//!     working directory ([`discovery::known_urls`]).
//! 3.  **Discovery**: list the candidates under the target path
//!     ([`discovery::discover_candidates`]).
//! 4.  **Decision**: for each candidate, in discovery order, [`Registrar::classify`]
//!     skips known URLs and skip-domain matches without asking anything. The
//!     rest go to the operator for a name and the old/archive question, then to
//!     `git submodule add` under a timeout.
//!
//! A candidate's failure, including a timed-out `git submodule add`, is
//! reported through the observer and the loop continues. Only a failure to
//! read the operator's answer ends the run early.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};

use crate::config::{Config, SkipDomains};
use crate::discovery::{self, Candidate};
use crate::error::{Error, Result};
use crate::git::{self, GitRunner};
use crate::prompt::{NameAnswer, Prompter};

/// Why a candidate was not offered to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The URL is already a registered submodule (or was registered earlier
    /// in this run).
    AlreadyRegistered,
    /// The URL matched this skip-domain pattern.
    SkipDomain(String),
}

/// Result of the filtering stage for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Skip(SkipReason),
    /// Ask the operator, proposing this name.
    Prompt { default_name: String },
}

/// Something worth telling the operator about, in the order it happens.
#[derive(Debug)]
pub enum Event<'a> {
    Found(&'a Candidate),
    Skipped {
        candidate: &'a Candidate,
        reason: &'a SkipReason,
    },
    Cancelled(&'a Candidate),
    /// `git submodule add` is about to run.
    Adding {
        candidate: &'a Candidate,
        destination: &'a str,
    },
    Registered {
        candidate: &'a Candidate,
        destination: &'a str,
    },
    Failed {
        candidate: &'a Candidate,
        destination: &'a str,
        error: &'a Error,
    },
}

/// Final state of one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Registered,
    Skipped,
    Cancelled,
    Failed,
}

/// Counts per outcome over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub found: usize,
    pub registered: usize,
    pub skipped: usize,
    pub cancelled: usize,
    pub failed: usize,
}

impl Summary {
    fn record(&mut self, outcome: Outcome) {
        self.found += 1;
        match outcome {
            Outcome::Registered => self.registered += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Cancelled => self.cancelled += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Default submodule name for `url`: its last path segment up to the first `.`.
///
/// `https://host/group/project.git` gives `project`, and so does the scp-like
/// `git@host:group/project.git`.
pub fn default_destination(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    let segment = url.rsplit(|c: char| c == '/' || c == ':').next().unwrap_or(url);
    segment.split('.').next().unwrap_or_default().to_string()
}

/// Place `name` under `archive_dir` when the repository is old.
pub fn destination(name: &str, archived: bool, archive_dir: &str) -> String {
    if archived {
        format!("{}/{}", archive_dir.trim_end_matches('/'), name)
    } else {
        name.to_string()
    }
}

/// Registers candidate repositories as submodules.
pub struct Registrar<'a> {
    git: &'a dyn GitRunner,
    prompter: &'a mut dyn Prompter,
    skip_domains: SkipDomains,
    archive_dir: String,
    timeout: Duration,
    known: HashSet<String>,
}

impl<'a> Registrar<'a> {
    pub fn new(
        config: &Config,
        git: &'a dyn GitRunner,
        prompter: &'a mut dyn Prompter,
    ) -> Result<Self> {
        Ok(Self {
            git,
            prompter,
            skip_domains: config.skip_domains()?,
            archive_dir: config.archive_dir.clone(),
            timeout: config.timeout(),
            known: HashSet::new(),
        })
    }

    /// Seed the set of URLs treated as already registered.
    pub fn with_known_urls<I: IntoIterator<Item = String>>(mut self, urls: I) -> Self {
        self.known.extend(urls);
        self
    }

    pub fn known_urls(&self) -> &HashSet<String> {
        &self.known
    }

    /// Decide, without any I/O, whether `candidate` is skipped or offered.
    pub fn classify(&self, candidate: &Candidate) -> Classification {
        if self.known.contains(&candidate.url) {
            return Classification::Skip(SkipReason::AlreadyRegistered);
        }
        if let Some(pattern) = self.skip_domains.matching(&candidate.url) {
            return Classification::Skip(SkipReason::SkipDomain(pattern.to_string()));
        }
        Classification::Prompt {
            default_name: default_destination(&candidate.url),
        }
    }

    /// Run the whole workflow against `target`.
    pub fn register_all(
        &mut self,
        target: &Path,
        observer: &mut dyn FnMut(&Event<'_>),
    ) -> Result<Summary> {
        let work_dir = self.git.work_dir().to_path_buf();

        if !git::has_repository(&work_dir) {
            info!("Initializing a repository in {}", work_dir.display());
            git::init(self.git)?;
        }

        let known = discovery::known_urls(&work_dir)?;
        self.known.extend(known);

        let candidates = discovery::discover_candidates(target)?;
        debug!(
            "{} candidate(s) under {}, {} URL(s) known",
            candidates.len(),
            target.display(),
            self.known.len()
        );

        self.register_candidates(&candidates, observer)
    }

    /// Run the decision sequence over already discovered candidates.
    pub fn register_candidates(
        &mut self,
        candidates: &[Candidate],
        observer: &mut dyn FnMut(&Event<'_>),
    ) -> Result<Summary> {
        let mut summary = Summary::default();
        for candidate in candidates {
            let outcome = self.process(candidate, observer)?;
            summary.record(outcome);
        }
        Ok(summary)
    }

    /// Take one candidate through filtering, prompting and registration.
    ///
    /// Only prompt failures are returned as errors.
    pub fn process(
        &mut self,
        candidate: &Candidate,
        observer: &mut dyn FnMut(&Event<'_>),
    ) -> Result<Outcome> {
        observer(&Event::Found(candidate));

        let default_name = match self.classify(candidate) {
            Classification::Skip(reason) => {
                debug!("Skipping {}: {:?}", candidate.url, reason);
                observer(&Event::Skipped {
                    candidate,
                    reason: &reason,
                });
                return Ok(Outcome::Skipped);
            }
            Classification::Prompt { default_name } => default_name,
        };

        let name = match self.prompter.ask_name(candidate, &default_name)? {
            NameAnswer::Cancel => {
                observer(&Event::Cancelled(candidate));
                return Ok(Outcome::Cancelled);
            }
            NameAnswer::Default => default_name,
            NameAnswer::Rename(name) => name,
        };
        let archived = self.prompter.ask_archived(candidate)?;
        let destination = destination(&name, archived, &self.archive_dir);

        observer(&Event::Adding {
            candidate,
            destination: &destination,
        });
        match git::submodule_add(self.git, &candidate.url, &destination, self.timeout) {
            Ok(()) => {
                info!("Registered {} at {}", candidate.url, destination);
                self.known.insert(candidate.url.clone());
                observer(&Event::Registered {
                    candidate,
                    destination: &destination,
                });
                Ok(Outcome::Registered)
            }
            Err(error) => {
                warn!("Could not register {}: {}", candidate.url, error);
                observer(&Event::Failed {
                    candidate,
                    destination: &destination,
                    error: &error,
                });
                Ok(Outcome::Failed)
            }
        }
    }
}

impl std::fmt::Debug for Registrar<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registrar")
            .field("skip_domains", &self.skip_domains)
            .field("archive_dir", &self.archive_dir)
            .field("timeout", &self.timeout)
            .field("known", &self.known.len())
            .finish_non_exhaustive()
    }
}
