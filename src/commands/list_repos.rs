//! # List Repositories Command Implementation
//!
//! Lists every directory under a path that holds a `.git` directory, in the
//! order `create` would visit them. This is a read-only operation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use git_submodules::discovery;
use git_submodules::suggestions;

/// Output format for the listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// One entry per line
    #[default]
    Text,
    /// A JSON array
    Json,
}

/// List the git repositories found under a directory
#[derive(Args, Debug)]
pub struct ListReposArgs {
    /// Directory to scan
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Execute the `list-repos` command.
pub fn execute(args: ListReposArgs) -> Result<()> {
    if !args.path.is_dir() {
        return Err(suggestions::target_not_found(&args.path));
    }

    let repositories = discovery::list_repositories(&args.path)?;
    match args.format {
        OutputFormat::Text => {
            for repository in &repositories {
                println!("{}", repository.display());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&repositories)?);
        }
    }
    Ok(())
}
