//! # Error Suggestions
//!
//! Helpers that build errors with hints. An error should say what went wrong
//! and what to do about it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use git_submodules::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Directory does not exist: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::target_not_found(path));
//! ```

use std::path::Path;

use crate::error::Error;

/// The directory to scan does not exist or is not a directory.
pub fn target_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Directory does not exist: {path}\n\n\
         hint: Pass the directory that contains the repositories to register\n\
         hint: Relative paths are resolved from the current directory",
        path = path.display()
    )
}

/// An explicitly requested configuration file is missing.
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Check the path given with --config\n\
         hint: Check the GIT_SUBMODULES_CONFIG environment variable\n\
         hint: Omit both to use .git-submodules.yaml or the built-in defaults",
        path = path.display()
    )
}

/// A skip-domain pattern does not compile.
pub fn invalid_skip_domain(pattern: &str, error: &regex::Error) -> anyhow::Error {
    let hint = match error {
        regex::Error::Syntax(msg) if msg.contains("unclosed") => {
            "hint: Check for unclosed brackets, parentheses, or braces"
        }
        regex::Error::Syntax(msg) if msg.contains("repetition") => {
            "hint: Repetition operators (+, *, ?) must follow a pattern"
        }
        _ => "hint: A plain host name such as 'gitlab.example.com' is a valid pattern",
    };

    anyhow::anyhow!(
        "Invalid skip-domain pattern: {pattern}\n\
         error: {error}\n\n\
         {hint}\n\
         hint: Patterns are searched for anywhere in the URL; escape '.' as '\\.' to match it literally"
    )
}

/// The current directory is not the root of a git work tree.
pub fn not_a_repository(dir: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Not a git repository: {dir}\n\n\
         hint: Run this command from the root of the repository that owns the submodules",
        dir = dir.display()
    )
}

/// `name` is not among the registered submodules.
pub fn unknown_submodule(name: &str, known: &[&str]) -> anyhow::Error {
    let did_you_mean = find_similar(name, known)
        .map(|s| format!("\nhint: Did you mean '{s}'?"))
        .unwrap_or_default();

    anyhow::anyhow!(
        "No submodule named '{name}'{did_you_mean}\n\n\
         hint: Run 'git-submodules list-submodules' to see the registered submodules"
    )
}

/// A delete or move pipeline stopped.
pub fn step_failed(error: Error) -> anyhow::Error {
    let hint = match &error {
        Error::StepFailed { step, .. } => match step.as_str() {
            "push" => {
                "hint: The removal is committed locally; push it yourself or rerun with --no-push"
            }
            "commit" => "hint: Check that user.name and user.email are configured for git",
            "move" => "hint: Check that the destination does not already exist",
            "deinit" | "remove" => "hint: Check the name with 'git-submodules list-submodules'",
            _ => "hint: Fix the problem above and finish the remaining steps with git",
        },
        _ => "hint: Fix the problem above and run the command again",
    };

    anyhow::anyhow!("{error}\n\n{hint}")
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Single-row dynamic programming over b
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, ca) in a_chars.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }
    row[b_chars.len()]
}
