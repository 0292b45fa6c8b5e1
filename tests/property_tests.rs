//! Property-based tests for rounding, ordering and the report projections.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::collections::BTreeSet;

use proptest::prelude::*;

use cqline::checks::{proposal, CheckContext};
use cqline::core::geom::{is_decimetre_rounded, round1, RoundedCoord};
use cqline::core::types::{Label, LineId, PointId};
use cqline::engine::report::{Report, RunResult};
use cqline::reference::ReferenceData;
use cqline::store::{LayerStore, ProposalRecord};

/// Strategy for proposal rows: (PFF, ESFITA, ORDPF).
fn proposal_row() -> impl Strategy<Value = (bool, bool, Option<i64>)> {
    (any::<bool>(), any::<bool>(), prop::option::of(0i64..4))
}

proptest! {
    /// Coordinates on the decimetre grid pass the decimal check.
    #[test]
    fn decimetre_grid_is_rounded(x_dm in -10_000_000i64..10_000_000, y_dm in -10_000_000i64..10_000_000) {
        let x = x_dm as f64 / 10.0;
        let y = y_dm as f64 / 10.0;
        prop_assert!(is_decimetre_rounded(x, y));
    }

    /// Coordinates at least 2 cm off the grid fail it.
    #[test]
    fn off_grid_is_not_rounded(x_dm in -1_000_000i64..1_000_000, offset in 0.02f64..0.08) {
        let x = x_dm as f64 / 10.0 + offset;
        prop_assert!(!is_decimetre_rounded(x, 0.0));
    }

    /// Rounding is idempotent, and so is the rounded key.
    #[test]
    fn rounding_is_idempotent(x in -1.0e6f64..1.0e6, y in -1.0e6f64..1.0e6) {
        prop_assert_eq!(round1(round1(x)), round1(x));
        let key = RoundedCoord::new(x, y);
        prop_assert_eq!(RoundedCoord::new(key.x(), key.y()), key);
    }

    /// The ordering number is the first run of digits.
    #[test]
    fn label_number_is_first_digit_run(prefix in "[A-Z]{1,3}", n in 0u64..1_000_000_000, m in 0u64..100) {
        let label = Label::new(format!("{prefix}-{n}-{m}"));
        prop_assert_eq!(label.number(), Some(n));
    }

    /// Proposal errors are exactly the null orders plus the real markers
    /// with order 0 on the final line.
    #[test]
    fn proposal_errors_match_order_rules(rows in prop::collection::vec(proposal_row(), 0..20)) {
        let proposals: Vec<ProposalRecord> = rows
            .iter()
            .enumerate()
            .map(|(i, (is_final, is_real, order))| ProposalRecord {
                point_id: PointId::new(format!("P-{i}")).unwrap(),
                is_final: *is_final,
                is_real_marker: *is_real,
                order: *order,
            })
            .collect();
        let expected = rows
            .iter()
            .filter(|(is_final, is_real, order)| {
                order.is_none() || (*is_final && *is_real && *order == Some(0))
            })
            .count();

        let layers = LayerStore::new(vec![], vec![], vec![], proposals, vec![]);
        let reference = ReferenceData::default();
        let photos = BTreeSet::new();
        let ctx = CheckContext::new(LineId::new(1).unwrap(), &layers, &reference, &photos);
        let mut report = Report::new();
        proposal::check(&ctx, &mut report);

        prop_assert_eq!(report.error_count(), expected);
    }

    /// One entry is always one line of the text log.
    #[test]
    fn text_log_keeps_one_line_per_entry(messages in prop::collection::vec("(?s).{0,40}", 0..10)) {
        let mut report = Report::new();
        for message in &messages {
            report.error(message.clone());
        }
        let result = RunResult::completed(LineId::new(5).unwrap(), None, report);

        // status and message header lines
        prop_assert_eq!(result.to_text().lines().count(), messages.len() + 2);
    }
}
