//! checks::proposal
//!
//! Counts and consistency of the proposal table (`P_Proposta`).
//!
//! Three counts are always reported: final real markers, final auxiliary
//! points and non-final points. Two inconsistencies are errors:
//!
//! - a row with no `ORDPF`
//! - a final row flagged as a real marker whose `ORDPF` is 0, which is
//!   the order value reserved for auxiliary points

use crate::engine::report::Report;
use crate::store::entity::PROPOSALS;

use super::CheckContext;

pub fn check(ctx: &CheckContext<'_>, report: &mut Report) {
    let proposals = ctx.layers.proposals();

    let real = proposals
        .iter()
        .filter(|p| p.is_final && p.is_real_marker)
        .count();
    let auxiliary = proposals
        .iter()
        .filter(|p| p.is_final && !p.is_real_marker)
        .count();
    let not_final = proposals.iter().filter(|p| !p.is_final).count();

    report.info(format!("Final line: {real} real markers"));
    report.info(format!("Final line: {auxiliary} auxiliary points"));
    report.info(format!("{not_final} points are not on the final line"));

    let before = report.error_count();
    for record in proposals {
        match record.order {
            None => report.error(format!(
                "ID_PUNT {} in {PROPOSALS} has no ORDPF",
                record.point_id
            )),
            Some(0) if record.is_final && record.is_real_marker => report.error(format!(
                "ID_PUNT {} in {PROPOSALS} is a real marker with ORDPF 0, which is reserved for auxiliary points",
                record.point_id
            )),
            Some(_) => {}
        }
    }

    if report.error_count() == before {
        report.info(format!("{PROPOSALS} records are consistent"));
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixture::*;
    use super::*;

    #[test]
    fn counts_by_classification() {
        let layers = store(
            vec![],
            vec![],
            vec![
                proposal("P-1", true, true, Some(1)),
                proposal("P-2", true, true, Some(2)),
                proposal("P-3", true, false, Some(0)),
                proposal("P-4", false, false, Some(0)),
            ],
            vec![],
        );
        let report = run(check, &layers);
        let messages: Vec<_> = report.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "Final line: 2 real markers",
                "Final line: 1 auxiliary points",
                "1 points are not on the final line",
                "P_Proposta records are consistent",
            ]
        );
    }

    #[test]
    fn flags_missing_order_and_real_marker_with_order_zero() {
        let layers = store(
            vec![],
            vec![],
            vec![
                proposal("P-1", true, true, None),
                proposal("P-2", true, true, Some(0)),
                proposal("P-3", false, true, Some(0)),
                proposal("P-4", true, false, Some(0)),
            ],
            vec![],
        );
        let report = run(check, &layers);
        let errors = errors(&report);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "ID_PUNT P-1 in P_Proposta has no ORDPF");
        assert!(errors[1].starts_with("ID_PUNT P-2 in P_Proposta is a real marker with ORDPF 0"));
    }
}
