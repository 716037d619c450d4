//! CLI theme and styling.

use colored::Colorize;
use garrison_core::{Timestamp, UserStatus};

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an info message.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Format a separator line.
    pub(crate) fn separator() -> String {
        "━".repeat(60).dimmed().to_string()
    }

    /// Format a key-value pair.
    pub(crate) fn kv(key: &str, value: &str) -> String {
        format!("{}: {}", key.bold(), value)
    }

    /// Format a user status.
    pub(crate) fn status(status: UserStatus) -> String {
        match status {
            UserStatus::Pending => status.as_str().yellow().to_string(),
            UserStatus::Approved => status.as_str().green().to_string(),
            UserStatus::Rejected => status.as_str().red().to_string(),
        }
    }

    /// Format a timestamp.
    pub(crate) fn timestamp(ts: &Timestamp) -> String {
        ts.0.with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .dimmed()
            .to_string()
    }
}

/// Print the banner shown above interactive output.
pub(crate) fn print_banner() {
    println!(
        "\n{}  {}\n",
        "GARRISON".bold().cyan(),
        Theme::dimmed(concat!("admin console v", env!("CARGO_PKG_VERSION")))
    );
}
