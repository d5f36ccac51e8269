//! # Delete Command Implementation
//!
//! This module implements the `delete` subcommand, which unregisters a
//! submodule: deinit, `git rm`, purge of `.git/modules/<name>`, removal of the
//! config section, commit, and push. The argument may be the submodule's name
//! or its path.
//!
//! The steps run in order and the command stops at the first one that fails,
//! naming it. Purging the metadata and removing the config section usually
//! find nothing left to do after `git rm`; their failures are only logged.

use anyhow::Result;
use clap::Args;

use git_submodules::output::{OutputConfig, Status};
use git_submodules::pipeline::{self, Pipeline};
use git_submodules::suggestions;

use super::mv::print_step;

/// Remove a submodule and commit the removal
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Name or path of the submodule to remove
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Commit the removal but do not push it
    #[arg(long)]
    pub no_push: bool,
}

/// Execute the `delete` command.
pub fn execute(args: DeleteArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    pipeline::relative_path(&args.name)?;

    let git = super::repository_root()?;
    let submodule = super::ensure_submodule(&git, &args.name)?;
    let pipeline = Pipeline::delete_submodule(&submodule.name, &submodule.path, !args.no_push)?;

    println!(
        "{}",
        out.line(Status::Scan, format!("Removing submodule {}", args.name))
    );
    pipeline
        .run(&git, &mut |report| print_step(&out, report))
        .map_err(suggestions::step_failed)?;

    println!(
        "{}",
        out.line(Status::Success, format!("Removed submodule {}", args.name))
    );
    Ok(())
}
