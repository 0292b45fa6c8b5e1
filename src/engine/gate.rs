//! engine::gate
//!
//! Gating failures: conditions that stop a run before or between checks.
//!
//! # Architecture
//!
//! A run either completes (every check runs and contributes entries) or
//! is gated. A gated run returns `status = error` with exactly one
//! explanatory message, the `Display` of its [`GateFailure`], and no
//! entries.
//!
//! Gating sources, in the order the pipeline meets them:
//!
//! 1. Ingestion ([`IngestError`]): folder, tree, lock, cleanup, entities,
//!    copy, load
//! 2. Reference data ([`ReferenceError`])
//! 3. Schema of the line layer ([`GateFailure::Schema`])
//! 4. Time budget ([`GateFailure::TimeBudget`])
//!
//! # Invariants
//!
//! - Every gating failure maps to one message
//! - Domain findings never gate

use std::time::Duration;

use thiserror::Error;

use crate::ingest::IngestError;
use crate::reference::ReferenceError;
use crate::store::entity;

/// Why a run stopped early.
#[derive(Debug, Error)]
pub enum GateFailure {
    #[error("{0}")]
    Ingest(#[from] IngestError),

    #[error("{0}")]
    Reference(#[from] ReferenceError),

    #[error(
        "{} has an invalid field structure and cannot be checked: missing {}",
        entity::LINE_SEGMENTS,
        .missing.join(", ")
    )]
    Schema { missing: Vec<String> },

    #[error("time budget of {}s exceeded before {next_check}", .budget.as_secs())]
    TimeBudget {
        budget: Duration,
        next_check: &'static str,
    },
}

impl GateFailure {
    /// Short machine-readable kind, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            GateFailure::Ingest(IngestError::LineFolderMissing { .. }) => "line-folder-missing",
            GateFailure::Ingest(IngestError::InvalidTree { .. }) => "invalid-tree",
            GateFailure::Ingest(IngestError::Lock(_)) => "line-locked",
            GateFailure::Ingest(IngestError::Cleanup(_) | IngestError::Workspace(_)) => {
                "workspace"
            }
            GateFailure::Ingest(IngestError::MissingEntities { .. }) => "missing-entities",
            GateFailure::Ingest(IngestError::Copy { .. }) => "copy",
            GateFailure::Ingest(IngestError::Load(_) | IngestError::Photos { .. }) => "load",
            GateFailure::Reference(_) => "reference",
            GateFailure::Schema { .. } => "schema",
            GateFailure::TimeBudget { .. } => "time-budget",
        }
    }
}
