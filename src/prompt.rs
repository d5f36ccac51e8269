//! # Operator Prompts
//!
//! Each candidate that survives filtering costs the operator two questions:
//! which name to register it under, and whether it is an old repository that
//! belongs in the archive directory.
//!
//! [`Prompter`] keeps those questions out of the registrar's loop. On a
//! terminal, [`TerminalPrompter`] asks through `dialoguer`; when stdin is a
//! pipe, [`LinePrompter`] reads one answer per line, which keeps scripted runs
//! and tests possible.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme};
use dialoguer::{Confirm, Input};

use crate::discovery::Candidate;
use crate::error::{Error, Result};

/// Answer to the name question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameAnswer {
    /// Keep the name derived from the URL.
    Default,
    /// Skip this candidate.
    Cancel,
    /// Register under this name instead.
    Rename(String),
}

impl NameAnswer {
    /// Interpret raw input: empty keeps the default, `cancel_token` cancels.
    pub fn parse(input: &str, cancel_token: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            NameAnswer::Default
        } else if input == cancel_token {
            NameAnswer::Cancel
        } else {
            NameAnswer::Rename(input.to_string())
        }
    }
}

/// `y` or `yes`, in any case; everything else is no.
pub fn parse_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Source of the operator's decisions for one candidate.
pub trait Prompter {
    /// Ask for the destination name, offering `default`.
    fn ask_name(&mut self, candidate: &Candidate, default: &str) -> Result<NameAnswer>;

    /// Ask whether the repository is old.
    fn ask_archived(&mut self, candidate: &Candidate) -> Result<bool>;
}

/// Interactive prompts on the terminal.
pub struct TerminalPrompter {
    theme: Box<dyn Theme>,
    cancel_token: String,
}

impl TerminalPrompter {
    pub fn new(cancel_token: impl Into<String>, use_color: bool) -> Self {
        let theme: Box<dyn Theme> = if use_color {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        };
        Self {
            theme,
            cancel_token: cancel_token.into(),
        }
    }
}

impl std::fmt::Debug for TerminalPrompter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPrompter")
            .field("cancel_token", &self.cancel_token)
            .finish_non_exhaustive()
    }
}

impl Prompter for TerminalPrompter {
    fn ask_name(&mut self, _candidate: &Candidate, default: &str) -> Result<NameAnswer> {
        let input: String = Input::with_theme(self.theme.as_ref())
            .with_prompt(format!(
                "New name? [Enter keeps '{}', '{}' skips]",
                default, self.cancel_token
            ))
            .allow_empty(true)
            .interact_text()?;
        Ok(NameAnswer::parse(&input, &self.cancel_token))
    }

    fn ask_archived(&mut self, _candidate: &Candidate) -> Result<bool> {
        Ok(Confirm::with_theme(self.theme.as_ref())
            .with_prompt("Is this repository old?")
            .default(false)
            .interact()?)
    }
}

/// Line-oriented prompts for non-interactive input.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
    cancel_token: String,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W, cancel_token: impl Into<String>) -> Self {
        Self {
            input,
            output,
            cancel_token: cancel_token.into(),
        }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::Prompt {
                message: "input closed before an answer was given".to_string(),
            });
        }
        // Echo the answer so transcripts read like a terminal session.
        writeln!(self.output, "{}", line.trim_end())?;
        Ok(line)
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask_name(&mut self, _candidate: &Candidate, default: &str) -> Result<NameAnswer> {
        let question = format!(
            "New name? [Enter keeps '{}', '{}' skips] : ",
            default, self.cancel_token
        );
        let answer = self.ask(&question)?;
        Ok(NameAnswer::parse(&answer, &self.cancel_token))
    }

    fn ask_archived(&mut self, _candidate: &Candidate) -> Result<bool> {
        let answer = self.ask("Is this repository old? [y/N] ")?;
        Ok(parse_yes(&answer))
    }
}

/// Pick the prompter that fits the process's stdin.
pub fn for_stdin(cancel_token: &str, use_color: bool) -> Box<dyn Prompter> {
    if io::stdin().is_terminal() && console::Term::stderr().is_term() {
        Box::new(TerminalPrompter::new(cancel_token, use_color))
    } else {
        Box::new(LinePrompter::new(
            io::stdin().lock(),
            io::stdout(),
            cancel_token,
        ))
    }
}
