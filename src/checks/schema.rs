//! checks::schema
//!
//! Field structure and content of the line layer.
//!
//! The field-set comparison is the pipeline's schema gate: a missing
//! field stops the run before any other check, so [`missing_fields`] only
//! reports and the orchestrator decides. Extra fields are allowed.
//!
//! [`check_content`] runs once the gate has passed.

use crate::core::types::LineId;
use crate::engine::report::Report;
use crate::store::{entity, LineFeature, LINE_SCHEMA};

use super::CheckContext;

/// `ID_FITA1`/`ID_FITA2` value meaning "not filled in".
const UNSET_MARKER: &str = "1";

/// Schema fields absent from `declared`, in schema order.
pub fn missing_fields(declared: &[String]) -> Vec<String> {
    LINE_SCHEMA
        .iter()
        .filter(|field| !declared.iter().any(|d| d == *field))
        .map(|field| field.to_string())
        .collect()
}

/// Line id and endpoint marker fields of every segment.
pub fn check_content(ctx: &CheckContext<'_>, report: &mut Report) {
    report.info(format!(
        "{} field structure is correct",
        entity::LINE_SEGMENTS
    ));

    let before = report.error_count();

    for segment in ctx.layers.segments() {
        if !segment.belongs_to(ctx.line) {
            report.error(foreign_line_message(segment, ctx.line));
        }
        for (n, marker) in segment.endpoint_markers.iter().enumerate() {
            if marker.as_deref().map(str::trim) == Some(UNSET_MARKER) {
                report.error(format!(
                    "Segment {} has ID_FITA{} = {UNSET_MARKER}, the marker id is not filled in",
                    segment.id,
                    n + 1
                ));
            }
        }
    }

    if report.error_count() == before {
        report.info(format!(
            "{} fields are correctly filled",
            entity::LINE_SEGMENTS
        ));
    }
}

fn foreign_line_message(segment: &LineFeature, line: LineId) -> String {
    match &segment.line_id {
        Some(value) => format!(
            "Segment {} has ID_LINIA {value}, expected {line}",
            segment.id
        ),
        None => format!("Segment {} has no ID_LINIA, expected {line}", segment.id),
    }
}
