//! core::paths
//!
//! Centralized path routing for submissions and run workspaces.
//!
//! # Architecture
//!
//! Two roots are involved in a run:
//!
//! - the **upload root**, holding one folder per line as delivered by the
//!   surveyor (read-only for the checker)
//! - the **work root**, holding per-line locks and per-run scratch
//!   workspaces
//!
//! **Hard rule:** No code outside this module joins folder names such as
//! `DocDelim` or `runs` onto a root. All paths go through
//! [`SubmissionPaths`] and [`WorkPaths`].
//!
//! # Storage Layout
//!
//! ```text
//! <upload_dir>/<line>/DocDelim/
//!     Cartografia/Lin_TramPpta.json, Punt.json
//!     Taules/P_Proposta.json, PUNT_FIT.json
//!     Fotografies/*.jpg
//!
//! <work_dir>/
//!     locks/<line>.lock
//!     runs/<line>-<run uuid>/
//! ```
//!
//! # Example
//!
//! ```
//! use cqline::core::paths::{SubmissionPaths, WorkPaths};
//! use cqline::core::types::LineId;
//! use std::path::PathBuf;
//!
//! let line = LineId::new(42).unwrap();
//! let sub = SubmissionPaths::new(PathBuf::from("/upload"), line);
//! assert_eq!(sub.line_dir(), PathBuf::from("/upload/42"));
//! assert_eq!(
//!     sub.entity_path("Punt"),
//!     PathBuf::from("/upload/42/DocDelim/Cartografia/Punt.json")
//! );
//!
//! let work = WorkPaths::new(PathBuf::from("/work"));
//! assert_eq!(work.lock_path(line), PathBuf::from("/work/locks/42.lock"));
//! ```

use std::path::{Path, PathBuf};

use crate::core::types::LineId;
use crate::store::entity;

/// Name of the folder holding the delimitation documents.
pub const DOC_DIR: &str = "DocDelim";
/// Cartography (layers) folder.
pub const CARTOGRAPHY_DIR: &str = "Cartografia";
/// Tables folder.
pub const TABLES_DIR: &str = "Taules";
/// Photographs folder.
pub const PHOTOS_DIR: &str = "Fotografies";

/// Subfolders every `DocDelim` tree must contain.
pub const REQUIRED_SUBDIRS: [&str; 3] = [CARTOGRAPHY_DIR, TABLES_DIR, PHOTOS_DIR];

/// Paths inside one line's upload folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPaths {
    upload_dir: PathBuf,
    line: LineId,
}

impl SubmissionPaths {
    pub fn new(upload_dir: PathBuf, line: LineId) -> Self {
        Self { upload_dir, line }
    }

    pub fn line(&self) -> LineId {
        self.line
    }

    /// `<upload_dir>/<line>`
    pub fn line_dir(&self) -> PathBuf {
        self.upload_dir.join(self.line.to_string())
    }

    /// `<upload_dir>/<line>/DocDelim`
    pub fn doc_dir(&self) -> PathBuf {
        self.line_dir().join(DOC_DIR)
    }

    pub fn subdir(&self, name: &str) -> PathBuf {
        self.doc_dir().join(name)
    }

    pub fn photos_dir(&self) -> PathBuf {
        self.subdir(PHOTOS_DIR)
    }

    /// Location of an entity document.
    ///
    /// Layers live in the cartography folder, tables in the tables folder.
    pub fn entity_path(&self, name: &str) -> PathBuf {
        self.subdir(folder_of(name)).join(entity_file(name))
    }
}

/// Paths under the work root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkPaths {
    work_dir: PathBuf,
}

impl WorkPaths {
    pub fn new(work_dir: PathBuf) -> Self {
        Self { work_dir }
    }

    pub fn root(&self) -> &Path {
        &self.work_dir
    }

    /// `<work_dir>/locks`
    pub fn locks_dir(&self) -> PathBuf {
        self.work_dir.join("locks")
    }

    /// `<work_dir>/locks/<line>.lock`
    pub fn lock_path(&self, line: LineId) -> PathBuf {
        self.locks_dir().join(format!("{line}.lock"))
    }

    /// `<work_dir>/runs`
    pub fn runs_dir(&self) -> PathBuf {
        self.work_dir.join("runs")
    }

    /// `<work_dir>/runs/<line>-<run>`
    pub fn run_dir(&self, line: LineId, run: &str) -> PathBuf {
        self.runs_dir().join(format!("{}{run}", run_prefix(line)))
    }
}

/// Prefix shared by every scratch workspace of a line.
pub fn run_prefix(line: LineId) -> String {
    format!("{line}-")
}

/// File name of an entity document.
pub fn entity_file(name: &str) -> String {
    format!("{name}.json")
}

fn folder_of(name: &str) -> &'static str {
    if entity::TABLES.contains(&name) {
        TABLES_DIR
    } else {
        CARTOGRAPHY_DIR
    }
}
