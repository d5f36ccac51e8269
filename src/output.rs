//! # Output Configuration
//!
//! Controls how operator-facing lines look. With colour enabled, status lines
//! start with an emoji; without it, with a bracketed tag such as `[SKIP]`.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

/// Kinds of status line the commands print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Scan,
    Found,
    Skip,
    Cancel,
    Add,
    Success,
    Failure,
    Timeout,
    Warning,
    Info,
}

impl Status {
    fn emoji(self) -> &'static str {
        match self {
            Status::Scan => "🔍",
            Status::Found => "📁",
            Status::Skip => "⏭️ ",
            Status::Cancel => "🚫",
            Status::Add => "➕",
            Status::Success => "✅",
            Status::Failure => "❌",
            Status::Timeout => "⏱️ ",
            Status::Warning => "⚠️ ",
            Status::Info => "💡",
        }
    }

    fn plain(self) -> &'static str {
        match self {
            Status::Scan => "[SCAN]",
            Status::Found => "[FOUND]",
            Status::Skip => "[SKIP]",
            Status::Cancel => "[CANCEL]",
            Status::Add => "[ADD]",
            Status::Success => "[OK]",
            Status::Failure => "[FAIL]",
            Status::Timeout => "[TIMEOUT]",
            Status::Warning => "[WARN]",
            Status::Info => "[INFO]",
        }
    }
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// `always` forces colors on (overriding `NO_COLOR`), `never` forces them
    /// off, anything else detects support from the environment.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Marker for a status line.
    pub fn marker(&self, status: Status) -> &'static str {
        if self.use_color {
            status.emoji()
        } else {
            status.plain()
        }
    }

    /// `"<marker> <message>"`
    pub fn line(&self, status: Status, message: impl std::fmt::Display) -> String {
        format!("{} {}", self.marker(status), message)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_always() {
        assert!(OutputConfig::from_env_and_flag("always").use_color);
        assert!(OutputConfig::from_env_and_flag("ALWAYS").use_color);
    }

    #[test]
    fn test_color_never() {
        assert!(!OutputConfig::from_env_and_flag("never").use_color);
    }

    #[test]
    fn test_line_with_color() {
        let config = OutputConfig { use_color: true };
        assert_eq!(config.line(Status::Success, "registered"), "✅ registered");
    }

    #[test]
    fn test_line_without_color() {
        let config = OutputConfig { use_color: false };
        assert_eq!(config.line(Status::Skip, "gatech.edu"), "[SKIP] gatech.edu");
        assert_eq!(config.marker(Status::Timeout), "[TIMEOUT]");
    }
}
