//! checks::relations
//!
//! Every point referenced by `P_Proposta` and `PUNT_FIT` must exist in
//! `Punt`. Each dangling reference is its own error entry.

use std::collections::HashSet;

use crate::core::types::PointId;
use crate::engine::report::Report;
use crate::store::entity::{FOUND_MARKERS, MARKER_POINTS, PROPOSALS};

use super::CheckContext;

pub fn check(ctx: &CheckContext<'_>, report: &mut Report) {
    let known: HashSet<&PointId> = ctx.layers.points().iter().map(|p| &p.id).collect();

    let proposals = ctx.layers.proposals().iter().map(|r| &r.point_id);
    dangling(report, &known, PROPOSALS, proposals);

    let found = ctx.layers.found_markers().iter().map(|r| &r.point_id);
    dangling(report, &known, FOUND_MARKERS, found);
}

fn dangling<'a>(
    report: &mut Report,
    known: &HashSet<&PointId>,
    table: &str,
    ids: impl Iterator<Item = &'a PointId>,
) {
    let before = report.error_count();
    for id in ids {
        if !known.contains(id) {
            report.error(format!(
                "ID_PUNT {id} in {table} is not in {MARKER_POINTS}"
            ));
        }
    }
    if report.error_count() == before {
        report.info(format!("Every ID_PUNT in {table} is in {MARKER_POINTS}"));
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixture::*;
    use super::*;

    #[test]
    fn consistent_tables_are_two_infos() {
        let layers = store(
            vec![],
            vec![point("P-1", "F-1", 0.0, 0.0)],
            vec![proposal("P-1", true, true, Some(1))],
            vec![found("P-1", "1", false, false)],
        );
        let report = run(check, &layers);
        assert_eq!(report.len(), 2);
        assert_eq!(report.error_count(), 0);
    }

    #[test]
    fn each_dangling_reference_is_reported() {
        let layers = store(
            vec![],
            vec![point("P-1", "F-1", 0.0, 0.0)],
            vec![
                proposal("P-1", true, true, Some(1)),
                proposal("P-2", true, true, Some(2)),
                proposal("P-3", false, true, Some(3)),
            ],
            vec![found("P-4", "4", true, false)],
        );
        let report = run(check, &layers);
        assert_eq!(
            errors(&report),
            [
                "ID_PUNT P-2 in P_Proposta is not in Punt",
                "ID_PUNT P-3 in P_Proposta is not in Punt",
                "ID_PUNT P-4 in PUNT_FIT is not in Punt",
            ]
        );
    }
}
