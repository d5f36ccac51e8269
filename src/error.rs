//! # Error Handling
//!
//! This module defines the centralized error type for the `git-submodules`
//! library. It uses `thiserror` to build a single `Error` enum covering every
//! failure the library can report, each variant carrying enough context to
//! tell the operator what went wrong.
//!
//! ## Key Components
//!
//! - **`Error`**: All failures of the library: configuration problems, git
//!   invocations that failed or timed out, pipeline steps that halted a
//!   delete or move, prompt I/O failures, and wrapped I/O and directory-walk
//!   errors. Malformed YAML is reported as a configuration error.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Per-candidate failures during registration are values of this type too;
//! the registrar reports them and moves on instead of propagating them.

use std::time::Duration;

use thiserror::Error;

/// Main error type for git-submodules operations
#[derive(Error, Debug)]
pub enum Error {
    /// The configuration file could not be understood.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration
        hint: Option<String>,
    },

    /// A skip-domain pattern is not a valid regular expression.
    #[error("Invalid skip-domain pattern '{pattern}': {source}")]
    SkipDomain {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A git command exited unsuccessfully or could not be started.
    #[error("Git command failed: git {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// A git command ran longer than its allotted time and was killed.
    #[error("Git command timed out after {}s: git {command}", timeout.as_secs_f64())]
    GitTimeout { command: String, timeout: Duration },

    /// A step of a delete or move pipeline failed and stopped the pipeline.
    #[error("Step {index}/{total} ({step}) failed: {source}")]
    StepFailed {
        step: String,
        index: usize,
        total: usize,
        #[source]
        source: Box<Error>,
    },

    /// Reading an answer from the operator failed.
    #[error("Prompt error: {message}")]
    Prompt { message: String },

    /// A path given to an operation is unusable.
    #[error("Path error: {path}: {message}")]
    Path { path: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A directory walk error, wrapped from `walkdir::Error`.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt {
            message: err.to_string(),
        }
    }
}

impl Error {
    /// Whether this error is a timeout of an external command.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::GitTimeout { .. })
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
