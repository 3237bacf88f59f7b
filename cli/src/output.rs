//! Styled terminal output.

use console::{Term, style};
use std::fmt::Display;

/// Writes styled lines to stdout. Write failures (closed pipe) are ignored.
pub struct Output {
    term: Term,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    /// Green check mark.
    pub fn success(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("✓").green().bold(), message)),
        );
    }

    /// Red cross.
    pub fn error(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("✗").red().bold(), message)),
        );
    }

    /// Yellow warning sign.
    pub fn warning(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("⚠").yellow().bold(), message)),
        );
    }

    /// Blue info icon.
    pub fn info(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&format!("{} {}", style("ℹ").blue().bold(), message)),
        );
    }

    pub fn print(&self, message: impl Display) {
        drop(self.term.write_line(&message.to_string()));
    }

    pub fn header(&self, message: impl Display) {
        drop(
            self.term
                .write_line(&style(message).bold().cyan().to_string()),
        );
    }

    pub fn divider(&self, width: usize) {
        drop(
            self.term
                .write_line(&style("─".repeat(width)).dim().to_string()),
        );
    }

    /// `label: value`, label dimmed and indented.
    pub fn labeled(&self, label: impl Display, value: impl Display) {
        drop(
            self.term
                .write_line(&format!("  {}: {}", style(label).dim(), value)),
        );
    }

    pub fn dim(&self, message: impl Display) {
        drop(self.term.write_line(&style(message).dim().to_string()));
    }

    /// Footer line for a listing.
    pub fn total(&self, count: usize, what: &str) {
        drop(self.term.write_line(&format!(
            "\n{}",
            style(format!("Total: {count} {what}")).dim()
        )));
    }
}
