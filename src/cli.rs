//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use crate::commands;

/// Git Submodules - Register the repositories under a directory as submodules
#[derive(Parser, Debug)]
#[command(name = "git-submodules")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to .git-submodules.yaml, then the user config)
    #[arg(long, global = true, value_name = "FILE", env = "GIT_SUBMODULES_CONFIG")]
    config: Option<PathBuf>,

    /// Colorize output (always, never, auto)
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["always", "never", "auto"]
    )]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register every repository found under PATH as a submodule
    Create(commands::create::CreateArgs),

    /// Remove a submodule, commit the removal and push it
    Delete(commands::delete::DeleteArgs),

    /// Move or rename a submodule and commit the move
    Move(commands::mv::MoveArgs),

    /// List the git repositories found under PATH
    ListRepos(commands::list_repos::ListReposArgs),

    /// List the submodules declared in .gitmodules
    ListSubmodules(commands::list_submodules::ListSubmodulesArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let color = self.color.as_str();
        match self.command {
            Commands::Create(args) => {
                commands::create::execute(args, self.config.as_deref(), color)
            }
            Commands::Delete(args) => commands::delete::execute(args, color),
            Commands::Move(args) => commands::mv::execute(args, color),
            Commands::ListRepos(args) => commands::list_repos::execute(args),
            Commands::ListSubmodules(args) => commands::list_submodules::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Log to stderr at `level`; `RUST_LOG` takes precedence when set.
fn init_logging(level: &str) {
    let level = level.parse().unwrap_or(LevelFilter::Warn);
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(None)
        .parse_env("RUST_LOG");
    // A logger may already be installed when embedded in tests
    let _ = builder.try_init();
}
