//! # Submodule Pipelines
//!
//! Deleting or moving a submodule takes a fixed series of git commands and
//! filesystem operations. Each is a named [`Step`]; a [`Pipeline`] runs them
//! in order and stops at the first step that fails, returning
//! [`Error::StepFailed`] with the step's position and name.
//!
//! Some steps are *tolerant*: their failure is logged and the pipeline goes
//! on. They clean up state that an earlier step has usually removed already
//! (`git submodule deinit` drops the `.git/config` section, for instance).
//!
//! ## Delete
//!
//! 1. `deinit`: `git submodule deinit -f -- <path>`
//! 2. `remove`: `git rm -f -- <path>`
//! 3. `purge metadata`: remove `.git/modules/<name>` (tolerant)
//! 4. `remove config section`: `git config --remove-section submodule.<name>` (tolerant)
//!
//! The name and the path are equal until the submodule is moved; git keeps
//! the metadata and the config section under the name.
//! 5. `commit`
//! 6. `push` (optional)
//!
//! ## Move
//!
//! 1. `deinit`: `git submodule deinit -f -- <old>`
//! 2. `prepare destination`: create the parent directory of `<new>`
//! 3. `move`: `git mv <old> <new>`
//! 4. `stage`: `git add .gitmodules`
//! 5. `commit`
//! 6. `update`: `git submodule update --init -- <new>`

use std::fs;
use std::path::{Component, Path, PathBuf};

use log::{info, warn};

use crate::defaults::METADATA_DIR;
use crate::error::{Error, Result};
use crate::git::GitRunner;

/// What a step does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Run git with these arguments.
    Git(Vec<String>),
    /// Recursively remove a directory, relative to the work tree.
    RemoveDir(PathBuf),
    /// Create a directory and its parents, relative to the work tree.
    CreateDir(PathBuf),
}

/// One named unit of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: &'static str,
    pub action: Action,
    /// A failure is logged instead of halting the pipeline.
    pub tolerant: bool,
}

impl Step {
    fn git(name: &'static str, args: &[&str]) -> Self {
        Self {
            name,
            action: Action::Git(args.iter().map(|a| a.to_string()).collect()),
            tolerant: false,
        }
    }

    fn tolerant(mut self) -> Self {
        self.tolerant = true;
        self
    }

    fn execute(&self, git: &dyn GitRunner) -> Result<()> {
        match &self.action {
            Action::Git(args) => {
                let args: Vec<&str> = args.iter().map(String::as_str).collect();
                git.run(&args, None).map(|_| ())
            }
            Action::RemoveDir(dir) => Ok(fs::remove_dir_all(git.work_dir().join(dir))?),
            Action::CreateDir(dir) => Ok(fs::create_dir_all(git.work_dir().join(dir))?),
        }
    }
}

/// How a completed step went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Done,
    /// The step failed but is tolerant; carries the error message.
    Tolerated(String),
}

/// Progress notification passed to the observer after each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// 1-based position of the step.
    pub index: usize,
    pub total: usize,
    pub name: &'static str,
    pub status: StepStatus,
}

/// An ordered list of steps that halts on the first non-tolerant failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    /// Steps that unregister the submodule `name` checked out at `path`,
    /// commit, and optionally push.
    pub fn delete_submodule(name: &str, path: &str, push: bool) -> Result<Self> {
        let name = relative_path(name)?;
        let path = relative_path(path)?;
        let section = format!("submodule.{}", name);
        let message = format!("Remove submodule {}", path);

        let mut steps = vec![
            Step::git("deinit", &["submodule", "deinit", "-f", "--", path]),
            Step::git("remove", &["rm", "-f", "--", path]),
            Step {
                name: "purge metadata",
                action: Action::RemoveDir(Path::new(METADATA_DIR).join("modules").join(name)),
                tolerant: true,
            },
            Step::git(
                "remove config section",
                &["config", "--remove-section", section.as_str()],
            )
            .tolerant(),
            Step::git("commit", &["commit", "-m", message.as_str()]),
        ];
        if push {
            steps.push(Step::git("push", &["push"]));
        }
        Ok(Self { steps })
    }

    /// Steps that relocate the submodule at `old` to `new` and commit the move.
    pub fn move_submodule(old: &str, new: &str) -> Result<Self> {
        let old = relative_path(old)?;
        let new = relative_path(new)?;
        if old == new {
            return Err(Error::Path {
                path: new.to_string(),
                message: "source and destination are the same".to_string(),
            });
        }
        let message = format!("Move submodule {} to {}", old, new);
        let parent = Path::new(new)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self {
            steps: vec![
                Step::git("deinit", &["submodule", "deinit", "-f", "--", old]),
                Step {
                    name: "prepare destination",
                    action: Action::CreateDir(parent),
                    tolerant: false,
                },
                Step::git("move", &["mv", old, new]),
                Step::git("stage", &["add", ".gitmodules"]),
                Step::git("commit", &["commit", "-m", message.as_str()]),
                Step::git("update", &["submodule", "update", "--init", "--", new]),
            ],
        })
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Run every step in order, reporting each one to `observer`.
    pub fn run(&self, git: &dyn GitRunner, observer: &mut dyn FnMut(&StepReport)) -> Result<()> {
        let total = self.steps.len();

        for (i, step) in self.steps.iter().enumerate() {
            let index = i + 1;
            info!("Step {}/{}: {}", index, total, step.name);

            let status = match step.execute(git) {
                Ok(()) => StepStatus::Done,
                Err(err) if step.tolerant => {
                    warn!("Step {} ({}) failed, continuing: {}", index, step.name, err);
                    StepStatus::Tolerated(err.to_string())
                }
                Err(err) => {
                    return Err(Error::StepFailed {
                        step: step.name.to_string(),
                        index,
                        total,
                        source: Box::new(err),
                    })
                }
            };

            observer(&StepReport {
                index,
                total,
                name: step.name,
                status,
            });
        }

        Ok(())
    }
}

/// Accept a relative path without `..`; trailing slashes are dropped.
pub fn relative_path(raw: &str) -> Result<&str> {
    let trimmed = raw.trim_end_matches('/');
    let path = Path::new(trimmed);
    let invalid = |message: &str| Error::Path {
        path: raw.to_string(),
        message: message.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("submodule path must not be empty"));
    }
    if path.is_absolute() {
        return Err(invalid("submodule path must be relative to the repository root"));
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return Err(invalid("submodule path must stay inside the repository"));
    }
    Ok(trimmed)
}
