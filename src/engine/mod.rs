//! engine
//!
//! Orchestrates one QA run: Ingest -> Gate -> Check -> Report -> Release.
//!
//! # Architecture
//!
//! [`Pipeline`] is the single entry point. It wires the two collaborators
//! (an [`Ingest`] for the submission, a [`ReferenceStore`] for persisted
//! lines) to the ordered [`CHECKS`] and folds everything into a
//! [`RunResult`]:
//!
//! 1. **Ingest**: obtain the typed layers for the line
//! 2. **Reference**: load the reference layers
//! 3. **Gate**: the line layer must carry the full field set
//! 4. **Check**: run every check in order, each appending entries
//! 5. **Release**: remove the scratch workspace and unlock the line
//!
//! Any failure in steps 1-3, or an exhausted time budget between checks,
//! is a [`GateFailure`]: the result is `status = error` with its message
//! and no entries. Findings of step 4 never gate.
//!
//! # Invariants
//!
//! - `run` always returns a `RunResult`, never an error
//! - A completed report starts with a header entry naming the line
//! - The submission is released on every path after a successful ingest
//!
//! # Example
//!
//! ```
//! use cqline::core::types::LineId;
//! use cqline::engine::{Pipeline, RunStatus};
//! use cqline::ingest::{IngestError, Submission};
//! use cqline::reference::{MemoryReferenceStore, ReferenceData};
//! use cqline::store::LayerStore;
//!
//! // A submission whose line layer declares no fields fails the schema gate.
//! let ingest = |line: LineId| -> Result<Submission, IngestError> {
//!     Ok(Submission::new(line, LayerStore::default()))
//! };
//! let reference = MemoryReferenceStore::new(ReferenceData::default());
//!
//! let result = Pipeline::new(&ingest, &reference).run(LineId::new(42).unwrap());
//! assert_eq!(result.status, RunStatus::Error);
//! assert!(result.entries.is_empty());
//! ```

pub mod gate;
pub mod report;

pub use gate::GateFailure;
pub use report::{Level, Report, ReportEntry, RunResult, RunStatus};

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::checks::{schema, CheckContext, CHECKS};
use crate::core::types::LineId;
use crate::ingest::{Ingest, Submission};
use crate::reference::ReferenceStore;

/// Limits applied to a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunPolicy {
    /// Wall-clock budget for the whole run. `None` means unlimited.
    pub time_budget: Option<Duration>,
}

impl RunPolicy {
    pub fn with_time_budget(budget: Duration) -> Self {
        Self {
            time_budget: Some(budget),
        }
    }

    /// Fail once the budget is used up, naming the check that would run next.
    fn ensure_within(&self, started: Instant, next_check: &'static str) -> Result<(), GateFailure> {
        match self.time_budget {
            Some(budget) if started.elapsed() >= budget => {
                Err(GateFailure::TimeBudget { budget, next_check })
            }
            _ => Ok(()),
        }
    }
}

/// The QA pipeline over its two collaborators.
pub struct Pipeline<'a> {
    ingest: &'a dyn Ingest,
    reference: &'a dyn ReferenceStore,
    policy: RunPolicy,
}

impl<'a> Pipeline<'a> {
    pub fn new(ingest: &'a dyn Ingest, reference: &'a dyn ReferenceStore) -> Self {
        Self {
            ingest,
            reference,
            policy: RunPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RunPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check one line.
    pub fn run(&self, line: LineId) -> RunResult {
        let started = Instant::now();
        let checked_at = Local::now();
        let span = tracing::info_span!("run", line_id = %line);
        let _entered = span.enter();

        match self.execute(line, started, checked_at) {
            Ok(result) => {
                info!(
                    entries = result.entries.len(),
                    errors = result.error_count(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "run completed"
                );
                result
            }
            Err(failure) => {
                warn!(kind = failure.kind(), "run gated: {failure}");
                RunResult::gated(line, failure.to_string()).with_checked_at(checked_at)
            }
        }
    }

    fn execute(
        &self,
        line: LineId,
        started: Instant,
        checked_at: DateTime<Local>,
    ) -> Result<RunResult, GateFailure> {
        let mut submission = self.ingest.ingest(line)?;
        debug!(
            segments = submission.layers.segments().len(),
            points = submission.layers.points().len(),
            photos = submission.photos.len(),
            "submission ingested"
        );

        let outcome = self.check(&submission, started, checked_at);

        if let Err(err) = submission.release() {
            warn!("cannot release line {line}: {err}");
        }

        let report = outcome?;
        Ok(RunResult::completed(line, submission.fingerprint.take(), report)
            .with_checked_at(checked_at))
    }

    fn check(
        &self,
        submission: &Submission,
        started: Instant,
        checked_at: DateTime<Local>,
    ) -> Result<Report, GateFailure> {
        let reference = self.reference.load()?;

        let missing = schema::missing_fields(submission.layers.line_fields());
        if !missing.is_empty() {
            return Err(GateFailure::Schema { missing });
        }

        let ctx = CheckContext::new(
            submission.line,
            &submission.layers,
            &reference,
            &submission.photos,
        );

        let mut report = Report::new();
        report.info(format!(
            "Line ID: {} | Checked at: {}",
            submission.line.padded(),
            checked_at.format(report::TIMESTAMP_FORMAT)
        ));

        for check in CHECKS.iter() {
            self.policy.ensure_within(started, check.name)?;
            let before = (report.len(), report.error_count());
            (check.run)(&ctx, &mut report);
            debug!(
                check = check.name,
                entries = report.len() - before.0,
                errors = report.error_count() - before.1,
                "check finished"
            );
        }

        Ok(report)
    }
}
