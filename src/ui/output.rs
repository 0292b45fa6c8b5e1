//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, the command prints the serialized result
//! instead of calling [`render`].

use std::fmt::Display;

use crate::engine::report::RunResult;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a debug message (only in debug mode).
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print a run result.
///
/// A gated run prints its message as an error. A completed run prints
/// every entry, then a summary; quiet mode keeps only the error entries.
pub fn render(result: &RunResult, verbosity: Verbosity) {
    if !result.is_ok() {
        error(result.message.as_deref().unwrap_or("line could not be checked"));
        return;
    }

    for entry in &result.entries {
        if entry.level.is_error() || verbosity != Verbosity::Quiet {
            println!("{}", entry.to_line());
        }
    }
    print(summary(result), verbosity);
}

/// One-line summary of a completed run.
pub fn summary(result: &RunResult) -> String {
    let headline = result.message.as_deref().unwrap_or("Line checked");
    match result.error_count() {
        0 => format!("{headline}: no errors"),
        1 => format!("{headline}: 1 error"),
        n => format!("{headline}: {n} errors"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::LineId;
    use crate::engine::report::Report;

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn summary_counts_errors() {
        let mut report = Report::new();
        report.error("a");
        report.error("b");
        let result = RunResult::completed(LineId::new(8).unwrap(), None, report);
        assert_eq!(summary(&result), "Line 8 checked: 2 errors");
    }
}
