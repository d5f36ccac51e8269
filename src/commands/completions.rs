//! # Completions Command Implementation
//!
//! Prints a `clap_complete` completion script for `git-submodules`:
//!
//! ```bash
//! git-submodules completions bash > ~/.local/share/bash-completion/completions/git-submodules
//! git-submodules completions zsh > ~/.zfunc/_git-submodules
//! git-submodules completions fish > ~/.config/fish/completions/git-submodules.fish
//! ```

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for (bash, zsh, fish, powershell, elvish)
    #[arg(value_enum, value_name = "SHELL")]
    pub shell: Shell,
}

/// Execute the `completions` command, writing the script to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
