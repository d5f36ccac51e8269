//! # Move Command Implementation
//!
//! This module implements the `move` subcommand, which relocates (or renames)
//! a registered submodule and commits the change. A common use is moving a
//! submodule into the archive directory:
//!
//! ```bash
//! git-submodules move libfoo old/libfoo
//! ```

use anyhow::Result;
use clap::Args;

use git_submodules::output::{OutputConfig, Status};
use git_submodules::pipeline::{Pipeline, StepReport, StepStatus};
use git_submodules::suggestions;

/// Move or rename a submodule
#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Current name or path of the submodule
    #[arg(value_name = "OLD")]
    pub old: String,

    /// New path of the submodule
    #[arg(value_name = "NEW")]
    pub new: String,
}

/// Execute the `move` command.
pub fn execute(args: MoveArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    // Reject bad paths before touching the repository.
    Pipeline::move_submodule(&args.old, &args.new)?;

    let git = super::repository_root()?;
    let submodule = super::ensure_submodule(&git, &args.old)?;
    let pipeline = Pipeline::move_submodule(&submodule.path, &args.new)?;

    println!(
        "{}",
        out.line(
            Status::Scan,
            format!("Moving submodule {} to {}", args.old, args.new)
        )
    );
    pipeline
        .run(&git, &mut |report| print_step(&out, report))
        .map_err(suggestions::step_failed)?;

    println!(
        "{}",
        out.line(
            Status::Success,
            format!("Moved submodule {} to {}", args.old, args.new)
        )
    );
    Ok(())
}

/// One line per completed pipeline step.
pub(super) fn print_step(out: &OutputConfig, report: &StepReport) {
    let progress = format!("[{}/{}] {}", report.index, report.total, report.name);
    match &report.status {
        StepStatus::Done => println!("{}", out.line(Status::Success, progress)),
        StepStatus::Tolerated(reason) => println!(
            "{}",
            out.line(Status::Warning, format!("{} (ignored: {})", progress, reason))
        ),
    }
}
