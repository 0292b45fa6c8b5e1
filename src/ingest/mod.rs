//! ingest
//!
//! The ingestion collaborator: turns a line identifier into typed layers.
//!
//! # Architecture
//!
//! The pipeline asks an [`Ingest`] implementation for a [`Submission`].
//! Ingestion either yields the typed [`LayerStore`] plus the photo listing,
//! or fails with an [`IngestError`] whose message becomes the single gating
//! message of the run.
//!
//! [`DirectoryIngest`] is the concrete implementation over an upload folder.
//! Closures `Fn(LineId) -> Result<Submission, IngestError>` also implement
//! the trait, which is how in-memory submissions are fed to the pipeline.
//!
//! # Ownership
//!
//! A `Submission` produced by `DirectoryIngest` owns the line lock and the
//! run's scratch workspace. [`Submission::release`] removes the workspace
//! and unlocks the line; dropping without releasing unlocks the line and
//! leaves the workspace for the next run to clean up.

pub mod fs;
pub mod workspace;

pub use fs::DirectoryIngest;
pub use workspace::{CleanupOutcome, Workspace, WorkspaceError};

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::ops::lock::{LineLock, LockError};
use crate::core::types::{Fingerprint, LineId};
use crate::store::{LayerStore, LoadError};

/// Errors from ingestion. Each one aborts the run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no submission folder for line {line} (expected '{path}')")]
    LineFolderMissing { line: LineId, path: PathBuf },

    #[error("invalid directory tree under '{path}': missing {}", .missing.join(", "))]
    InvalidTree { path: PathBuf, missing: Vec<String> },

    #[error("{0}")]
    Lock(#[from] LockError),

    #[error("temporary files could not be removed: {0}")]
    Cleanup(WorkspaceError),

    #[error("cannot prepare workspace: {0}")]
    Workspace(WorkspaceError),

    #[error("{}", missing_entities_message(.layers, .tables))]
    MissingEntities {
        layers: Vec<String>,
        tables: Vec<String>,
    },

    #[error("cannot copy {entity} into the workspace: {source}")]
    Copy {
        entity: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Load(#[from] LoadError),

    #[error("cannot list photos in '{path}': {source}")]
    Photos {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn missing_entities_message(layers: &[String], tables: &[String]) -> String {
    match (layers.is_empty(), tables.is_empty()) {
        (false, false) => format!(
            "missing layers ({}) and tables ({})",
            layers.join(", "),
            tables.join(", ")
        ),
        (false, true) => format!("missing layers: {}", layers.join(", ")),
        (true, false) => format!("missing tables: {}", tables.join(", ")),
        (true, true) => "missing layers or tables".to_string(),
    }
}

/// Supplies the submission for a line.
pub trait Ingest {
    fn ingest(&self, line: LineId) -> Result<Submission, IngestError>;
}

impl<F> Ingest for F
where
    F: Fn(LineId) -> Result<Submission, IngestError>,
{
    fn ingest(&self, line: LineId) -> Result<Submission, IngestError> {
        self(line)
    }
}

/// Lock and workspace held for the duration of a run.
#[derive(Debug)]
struct RunGuard {
    lock: LineLock,
    workspace: Workspace,
}

/// Everything the checks need about one submission.
#[derive(Debug)]
pub struct Submission {
    pub line: LineId,
    pub layers: LayerStore,
    /// Photo filenames present in the photo folder.
    pub photos: BTreeSet<String>,
    pub fingerprint: Option<Fingerprint>,
    guard: Option<RunGuard>,
}

impl Submission {
    /// An in-memory submission with no photos and no workspace.
    pub fn new(line: LineId, layers: LayerStore) -> Self {
        Self {
            line,
            layers,
            photos: BTreeSet::new(),
            fingerprint: None,
            guard: None,
        }
    }

    pub fn with_photos<I, S>(mut self, photos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.photos = photos.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    pub(crate) fn with_guard(mut self, lock: LineLock, workspace: Workspace) -> Self {
        self.guard = Some(RunGuard { lock, workspace });
        self
    }

    /// Scratch workspace of the run, if any.
    pub fn workspace_dir(&self) -> Option<&Path> {
        self.guard.as_ref().map(|g| g.workspace.dir())
    }

    /// Remove the workspace and release the line lock.
    ///
    /// The lock is released even if the workspace cannot be removed.
    /// Releasing twice is a no-op.
    pub fn release(&mut self) -> Result<(), IngestError> {
        let Some(RunGuard {
            mut lock,
            workspace,
        }) = self.guard.take()
        else {
            return Ok(());
        };
        let removed = workspace.remove();
        lock.release()?;
        removed.map_err(IngestError::Cleanup)
    }
}
