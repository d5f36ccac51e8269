//! # List Submodules Command Implementation
//!
//! Lists the submodules declared in the current repository's `.gitmodules`.
//! A repository without `.gitmodules` has none.

use std::env;

use anyhow::Result;
use clap::Args;

use git_submodules::git::{self, SystemGit};

use super::list_repos::OutputFormat;

/// List the submodules declared in .gitmodules
#[derive(Args, Debug)]
pub struct ListSubmodulesArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Execute the `list-submodules` command.
pub fn execute(args: ListSubmodulesArgs) -> Result<()> {
    let git = SystemGit::new(env::current_dir()?);
    let submodules = git::list_submodules(&git)?;

    match args.format {
        OutputFormat::Text => {
            for submodule in &submodules {
                if submodule.name == submodule.path {
                    println!("{}", submodule.path);
                } else {
                    println!("{} ({})", submodule.path, submodule.name);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&submodules)?);
        }
    }
    Ok(())
}
