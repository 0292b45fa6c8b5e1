//! engine::report
//!
//! Report aggregation and the final run result.
//!
//! # Architecture
//!
//! Checks append leveled [`ReportEntry`] values to a [`Report`] in emission
//! order. When the pipeline completes, the report is frozen into a
//! [`RunResult`] together with the run status.
//!
//! The report is built in memory and is the only source of truth. Two
//! projections are derived from a finished `RunResult`:
//!
//! - **JSON** (`serde_json`): explicit records, one object per entry
//! - **Text log**: one `[level] message` line per entry, with line breaks
//!   inside messages escaped so an entry never spans lines
//!
//! Neither projection is ever parsed back.
//!
//! # Invariants
//!
//! - Entries are never dropped or reordered
//! - A `RunResult` with `status = error` carries no entries
//! - A `RunResult` is never mutated after it is returned
//!
//! # Example
//!
//! ```
//! use cqline::core::types::LineId;
//! use cqline::engine::report::{Level, Report, RunResult, RunStatus};
//!
//! let mut report = Report::new();
//! report.info("Lin_TramPpta field structure is correct");
//! report.error("Marker F-3 | ID_PUNT P-3 is not rounded to decimetres");
//!
//! let result = RunResult::completed(LineId::new(42).unwrap(), None, report);
//! assert_eq!(result.status, RunStatus::Ok);
//! assert_eq!(result.error_count(), 1);
//! assert_eq!(result.entries[1].level, Level::Error);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::core::types::{Fingerprint, LineId};

/// Level of a report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

impl Level {
    pub fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Info => write!(f, "info"),
            Level::Error => write!(f, "error"),
        }
    }
}

/// One leveled message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub level: Level,
    pub message: String,
}

impl ReportEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }

    /// Render as a single `[level] message` line.
    pub fn to_line(&self) -> String {
        format!("[{}] {}", self.level, escape_line(&self.message))
    }
}

fn escape_line(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for c in message.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// Append-only collection of entries for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ReportEntry) {
        self.entries.push(entry);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ReportEntry::info(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ReportEntry::error(message));
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.level.is_error()).count()
    }

    pub fn into_entries(self) -> Vec<ReportEntry> {
        self.entries
    }
}

/// Whether the pipeline ran to completion.
///
/// `Ok` does not mean the submission is clean: findings are `error`
/// entries inside an `Ok` result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Ok,
    Error,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunStatus::Ok => write!(f, "ok"),
            RunStatus::Error => write!(f, "error"),
        }
    }
}

/// Final result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub status: RunStatus,
    pub message: Option<String>,
    pub line_id: LineId,
    pub fingerprint: Option<Fingerprint>,
    pub checked_at: DateTime<Local>,
    pub entries: Vec<ReportEntry>,
}

impl RunResult {
    /// A run that executed every check.
    pub fn completed(line: LineId, fingerprint: Option<Fingerprint>, report: Report) -> Self {
        Self {
            status: RunStatus::Ok,
            message: Some(format!("Line {line} checked")),
            line_id: line,
            fingerprint,
            checked_at: Local::now(),
            entries: report.into_entries(),
        }
    }

    /// A run stopped by a gating failure. Carries only the message.
    pub fn gated(line: LineId, message: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Error,
            message: Some(message.into()),
            line_id: line,
            fingerprint: None,
            checked_at: Local::now(),
            entries: Vec::new(),
        }
    }

    pub fn with_checked_at(mut self, at: DateTime<Local>) -> Self {
        self.checked_at = at;
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == RunStatus::Ok
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| e.level.is_error()).count()
    }

    /// Completed with at least one error entry.
    pub fn has_findings(&self) -> bool {
        self.is_ok() && self.error_count() > 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Human-readable text log.
    pub fn to_text(&self) -> String {
        let mut lines = vec![format!("[status] {}", self.status)];
        if let Some(message) = &self.message {
            lines.push(format!("[message] {}", escape_line(message)));
        }
        if let Some(fp) = &self.fingerprint {
            lines.push(format!("[fingerprint] {fp}"));
        }
        lines.extend(self.entries.iter().map(ReportEntry::to_line));
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    /// Log file name: `QA-Report_<padded line>_<YYYYmmdd-HHMM>.txt`.
    pub fn log_file_name(&self) -> String {
        format!(
            "QA-Report_{}_{}.txt",
            self.line_id.padded(),
            self.checked_at.format(TIMESTAMP_FORMAT)
        )
    }

    /// Write the text log into `dir`, creating it if needed.
    pub fn write_log(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.log_file_name());
        fs::write(&path, self.to_text())?;
        Ok(path)
    }
}

/// Timestamp format used in the report header and log file names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M";

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn line() -> LineId {
        LineId::new(42).unwrap()
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap()
    }

    #[test]
    fn report_keeps_emission_order() {
        let mut report = Report::new();
        report.info("a");
        report.error("b");
        report.info("c");

        let messages: Vec<_> = report.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["a", "b", "c"]);
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn gated_result_has_no_entries() {
        let result = RunResult::gated(line(), "missing tables: PUNT_FIT");
        assert_eq!(result.status, RunStatus::Error);
        assert!(result.entries.is_empty());
        assert!(!result.has_findings());
    }

    #[test]
    fn json_is_structured_records() {
        let mut report = Report::new();
        report.error("Segment 3-4 | crosses - segment 7");
        let result = RunResult::completed(line(), None, report);

        let value: serde_json::Value = serde_json::from_str(&result.to_json().unwrap()).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["line_id"], 42);
        assert_eq!(value["entries"][0]["level"], "error");
        assert_eq!(
            value["entries"][0]["message"],
            "Segment 3-4 | crosses - segment 7"
        );
    }

    #[test]
    fn text_escapes_line_breaks() {
        let mut report = Report::new();
        report.info("first\nsecond");
        report.error(r"path C:\data");
        let result = RunResult::completed(line(), None, report);

        insta::assert_snapshot!(result.to_text().trim_end(), @r###"
        [status] ok
        [message] Line 42 checked
        [info] first\nsecond
        [error] path C:\\data
        "###);
    }

    #[test]
    fn log_file_name_uses_padded_id_and_timestamp() {
        let result = RunResult::gated(line(), "x").with_checked_at(fixed_time());
        assert_eq!(result.log_file_name(), "QA-Report_0042_20240305-0907.txt");
    }

    #[test]
    fn write_log_creates_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("reports");
        let result = RunResult::gated(line(), "no submission folder").with_checked_at(fixed_time());

        let path = result.write_log(&dir).unwrap();
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("[status] error\n[message] no submission folder\n"));
    }
}
