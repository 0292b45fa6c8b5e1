//! checks::contact
//!
//! Three-municipality (3T) markers: the first and last final markers, in
//! label-number order, are where this line meets its two neighbours and
//! must carry the `CONTACTE` attribute.
//!
//! Ordering uses the first run of digits in the label, ascending, stable
//! for ties. Labels without digits cannot be ordered and are reported.

use crate::engine::report::Report;
use crate::store::MarkerPoint;

use super::CheckContext;

pub fn check(ctx: &CheckContext<'_>, report: &mut Report) {
    let mut ordered: Vec<(u64, &MarkerPoint)> = Vec::new();
    for point in ctx.final_points() {
        match point.label.number() {
            Some(n) => ordered.push((n, point)),
            None => report.error(format!(
                "Marker label '{}' of ID_PUNT {} has no number, cannot order it",
                point.label, point.id
            )),
        }
    }
    ordered.sort_by_key(|(n, _)| *n);

    match (ordered.first(), ordered.last()) {
        (Some((_, first)), Some((_, last))) => {
            let mut missing: Vec<String> = [first, last]
                .into_iter()
                .filter(|p| !has_contact(p))
                .map(|p| p.label.to_string())
                .collect();
            // a single final marker is both ends
            missing.dedup();
            if missing.is_empty() {
                report.info(format!(
                    "3T markers {} and {} have CONTACTE",
                    first.label, last.label
                ));
            } else {
                report.error(format!(
                    "3T markers without CONTACTE: {}",
                    missing.join(", ")
                ));
            }
        }
        _ => report.error("No final markers to identify the 3T markers"),
    }

    let with_contact = ctx
        .layers
        .points()
        .iter()
        .filter(|p| has_contact(p))
        .count();
    report.info(format!("{with_contact} markers have CONTACTE"));
}

fn has_contact(point: &MarkerPoint) -> bool {
    point
        .contact
        .as_deref()
        .is_some_and(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::super::fixture::*;
    use super::*;

    fn finals(ids: &[&str]) -> Vec<crate::store::ProposalRecord> {
        ids.iter()
            .enumerate()
            .map(|(i, id)| proposal(id, true, true, Some(i as i64 + 1)))
            .collect()
    }

    #[test]
    fn first_and_last_by_label_number() {
        let layers = store(
            vec![],
            vec![
                point("P-a", "F-10", 0.0, 0.0).with_contact("3T"),
                point("P-b", "F-2", 1.0, 0.0).with_contact("3T"),
                point("P-c", "F-5", 2.0, 0.0),
            ],
            finals(&["P-a", "P-b", "P-c"]),
            vec![],
        );
        let report = run(check, &layers);
        assert_eq!(report.error_count(), 0);
        assert_eq!(report.entries()[0].message, "3T markers F-2 and F-10 have CONTACTE");
        assert_eq!(report.entries()[1].message, "2 markers have CONTACTE");
    }

    #[test]
    fn missing_contact_names_the_marker() {
        let layers = store(
            vec![],
            vec![
                point("P-a", "F-1", 0.0, 0.0).with_contact("3T"),
                point("P-b", "F-9", 1.0, 0.0),
            ],
            finals(&["P-a", "P-b"]),
            vec![],
        );
        let report = run(check, &layers);
        assert_eq!(errors(&report), ["3T markers without CONTACTE: F-9"]);
    }

    #[test]
    fn no_final_markers_and_digitless_labels_are_errors() {
        let layers = store(
            vec![],
            vec![point("P-a", "aux", 0.0, 0.0)],
            finals(&["P-a"]),
            vec![],
        );
        let report = run(check, &layers);
        let errors = errors(&report);
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Marker label 'aux' of ID_PUNT P-a has no number"));
        assert_eq!(errors[1], "No final markers to identify the 3T markers");
    }
}
