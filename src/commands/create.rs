//! # Create Command Implementation
//!
//! This module implements the `create` subcommand, which walks a directory for
//! git repositories and registers each one as a submodule of the repository
//! in the current directory.
//!
//! ## Functionality
//!
//! - **Initialization**: runs `git init` when the current directory is not a
//!   repository yet.
//! - **Filtering**: URLs that are already registered or match a skip domain
//!   are reported and skipped without a question.
//! - **Prompts**: every other repository asks for a name (Enter keeps the
//!   default, the cancel token skips) and whether it is old.
//! - **Registration**: `git submodule add` runs under a timeout; a failure or
//!   timeout is reported and the walk continues.
//!
//! Questions go through `dialoguer` on a terminal. When stdin is not a
//! terminal, answers are read one per line, so the command can be scripted:
//!
//! ```bash
//! printf 'tools/lint\nn\nc\n' | git-submodules create ~/src --color never
//! ```

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};

use git_submodules::config::{self, Config};
use git_submodules::error::Error;
use git_submodules::git::SystemGit;
use git_submodules::output::{OutputConfig, Status};
use git_submodules::prompt;
use git_submodules::registrar::{Event, Registrar, SkipReason, Summary};
use git_submodules::suggestions;

/// Register the repositories found under a directory as submodules
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Directory to scan for repositories
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Seconds a single `git submodule add` may take
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Skip URLs matching this regular expression (repeatable, added to the configured list)
    #[arg(long = "skip-domain", value_name = "PATTERN")]
    pub skip_domains: Vec<String>,

    /// Directory that repositories marked as old are registered under
    #[arg(long, value_name = "DIR")]
    pub archive_dir: Option<String>,

    /// Answer to the name prompt that skips a repository
    #[arg(long, value_name = "TOKEN")]
    pub cancel_token: Option<String>,
}

/// Execute the `create` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `config_path` - The value of the global --config flag, if given
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: CreateArgs, config_path: Option<&Path>, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);

    if !args.path.is_dir() {
        return Err(suggestions::target_not_found(&args.path));
    }
    let config = resolve_config(&args, config_path)?;

    let git = SystemGit::new(env::current_dir()?);
    let mut prompter = prompt::for_stdin(&config.cancel_token, out.use_color);
    let mut registrar = Registrar::new(&config, &git, prompter.as_mut())?;

    println!(
        "{}",
        out.line(Status::Scan, format!("Scanning {}", args.path.display()))
    );
    let mut reporter = Reporter::new(out);
    let summary = registrar.register_all(&args.path, &mut |event| reporter.report(event))?;
    reporter.clear();

    println!();
    println!("{}", out.line(Status::Info, summary_line(&summary)));
    Ok(())
}

/// Load the configuration file and apply the command-line overrides.
fn resolve_config(args: &CreateArgs, config_path: Option<&Path>) -> Result<Config> {
    let (mut config, _) = config::load(config_path).map_err(|e| config_error(e, config_path))?;

    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    config.skip_domains.extend(args.skip_domains.iter().cloned());
    if let Some(dir) = &args.archive_dir {
        config.archive_dir = dir.clone();
    }
    if let Some(token) = &args.cancel_token {
        config.cancel_token = token.clone();
    }

    config
        .validate()
        .map_err(|e| config_error(e, config_path))?;
    Ok(config)
}

fn config_error(error: Error, config_path: Option<&Path>) -> anyhow::Error {
    match (error, config_path) {
        (Error::Path { .. }, Some(path)) => suggestions::config_not_found(path),
        (Error::SkipDomain { pattern, source }, _) => {
            suggestions::invalid_skip_domain(&pattern, &source)
        }
        (error, _) => error.into(),
    }
}

fn summary_line(summary: &Summary) -> String {
    format!(
        "{} found, {} registered, {} skipped, {} cancelled, {} failed",
        summary.found, summary.registered, summary.skipped, summary.cancelled, summary.failed
    )
}

/// Prints registrar events; shows a spinner while `git submodule add` runs on a terminal.
struct Reporter {
    out: OutputConfig,
    interactive: bool,
    spinner: Option<ProgressBar>,
}

impl Reporter {
    fn new(out: OutputConfig) -> Self {
        Self {
            out,
            interactive: console::Term::stdout().is_term(),
            spinner: None,
        }
    }

    fn report(&mut self, event: &Event<'_>) {
        let out = self.out;
        match event {
            Event::Found(candidate) => {
                println!();
                println!("{}", out.line(Status::Found, candidate.path.display()));
                println!("   url: {}", candidate.url);
            }
            Event::Skipped { candidate, reason } => {
                let message = match reason {
                    SkipReason::AlreadyRegistered => {
                        format!("Already registered: {}", candidate.url)
                    }
                    SkipReason::SkipDomain(pattern) => {
                        format!("Skipped {} (matches skip domain '{}')", candidate.url, pattern)
                    }
                };
                println!("{}", out.line(Status::Skip, message));
            }
            Event::Cancelled(candidate) => {
                println!("{}", out.line(Status::Cancel, format!("Cancelled {}", candidate.url)));
            }
            Event::Adding {
                candidate,
                destination,
            } => {
                let message = format!("Adding {} as {}", candidate.url, destination);
                if self.interactive {
                    self.spinner = Some(spinner(message));
                } else {
                    println!("{}", out.line(Status::Add, message));
                }
            }
            Event::Registered { destination, .. } => {
                self.clear();
                println!(
                    "{}",
                    out.line(Status::Success, format!("Registered {}", destination))
                );
            }
            Event::Failed {
                candidate, error, ..
            } => {
                self.clear();
                let status = if error.is_timeout() {
                    Status::Timeout
                } else {
                    Status::Failure
                };
                println!(
                    "{}",
                    out.line(status, format!("Could not add {}: {}", candidate.url, error))
                );
            }
        }
    }

    fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

fn spinner(message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} ({elapsed})") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
