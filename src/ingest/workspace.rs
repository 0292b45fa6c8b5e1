//! ingest::workspace
//!
//! Per-run scratch workspaces.
//!
//! # Architecture
//!
//! Every run copies the submission into its own directory
//! `<work_dir>/runs/<line>-<uuid>/`, so no two runs ever share scratch
//! state. A run removes its workspace when it releases the submission;
//! workspaces left behind by an interrupted run are removed by the next
//! run for the same line, while it holds the line lock.
//!
//! Cleanup reports through a typed [`CleanupOutcome`] / [`WorkspaceError`]
//! pair so that ingestion can treat a failure as an ordinary gating
//! condition.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::core::paths::{run_prefix, WorkPaths};
use crate::core::types::LineId;

/// Errors from workspace management.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("cannot create workspace '{path}': {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("cannot list workspaces in '{path}': {source}")]
    Scan { path: PathBuf, source: io::Error },

    #[error("cannot remove workspace '{path}': {source}")]
    Remove { path: PathBuf, source: io::Error },
}

/// Result of removing stale workspaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupOutcome {
    /// Workspaces removed.
    pub removed: Vec<PathBuf>,
}

/// Remove workspaces left for a line by earlier runs.
///
/// Must be called while holding the line lock.
pub fn cleanup_stale(paths: &WorkPaths, line: LineId) -> Result<CleanupOutcome, WorkspaceError> {
    let runs = paths.runs_dir();
    let entries = match fs::read_dir(&runs) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(CleanupOutcome::default()),
        Err(e) => {
            return Err(WorkspaceError::Scan {
                path: runs,
                source: e,
            })
        }
    };

    let prefix = run_prefix(line);
    let mut outcome = CleanupOutcome::default();
    for entry in entries {
        let entry = entry.map_err(|e| WorkspaceError::Scan {
            path: runs.clone(),
            source: e,
        })?;
        if !entry.file_name().to_string_lossy().starts_with(&prefix) {
            continue;
        }
        let path = entry.path();
        fs::remove_dir_all(&path).map_err(|e| WorkspaceError::Remove {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "removed stale workspace");
        outcome.removed.push(path);
    }
    Ok(outcome)
}

/// A scratch directory owned by one run.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    /// Create a fresh workspace for a run.
    pub fn create(paths: &WorkPaths, line: LineId) -> Result<Self, WorkspaceError> {
        let dir = paths.run_dir(line, &Uuid::new_v4().simple().to_string());
        fs::create_dir_all(&dir).map_err(|e| WorkspaceError::Create {
            path: dir.clone(),
            source: e,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Remove the workspace and everything in it.
    pub fn remove(self) -> Result<(), WorkspaceError> {
        fs::remove_dir_all(&self.dir).map_err(|e| WorkspaceError::Remove {
            path: self.dir.clone(),
            source: e,
        })
    }
}
