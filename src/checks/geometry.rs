//! checks::geometry
//!
//! Per-feature geometry validity of both layers, and the vertex census.
//!
//! A segment must be a single, non-empty, open linestring. A point must be
//! non-empty with finite coordinates. Each violation is reported per
//! feature; a layer without violations gets one info entry.

use crate::engine::report::Report;
use crate::store::entity::{LINE_SEGMENTS, MARKER_POINTS};

use super::CheckContext;

pub fn check_layers(ctx: &CheckContext<'_>, report: &mut Report) {
    report.info("Checking geometries");

    let before = report.error_count();
    for segment in ctx.layers.segments() {
        let geometry = &segment.geometry;
        if geometry.is_empty() {
            report.error(format!("Segment {} has an empty geometry", segment.id));
            continue;
        }
        if geometry.is_ring() {
            report.error(format!("Segment {} is a ring", segment.id));
        }
        if geometry.is_multipart() {
            report.error(format!(
                "Segment {} is multi-part with {} parts",
                segment.id,
                geometry.part_count()
            ));
        }
    }
    if report.error_count() == before {
        report.info(format!("No geometry errors in {LINE_SEGMENTS}"));
    }

    let before = report.error_count();
    for point in ctx.layers.points() {
        match &point.position {
            None => report.error(format!(
                "Point {} ({}) has an empty geometry",
                point.id, point.label
            )),
            Some(position) if !position.is_valid() => report.error(format!(
                "Point {} ({}) has an invalid geometry",
                point.id, point.label
            )),
            Some(_) => {}
        }
    }
    if report.error_count() == before {
        report.info(format!("No geometry errors in {MARKER_POINTS}"));
    }
}

/// One info entry per segment with its vertex count.
pub fn vertex_census(ctx: &CheckContext<'_>, report: &mut Report) {
    for segment in ctx.layers.segments() {
        report.info(format!(
            "Segment {} has {} vertices",
            segment.id,
            segment.geometry.vertex_count()
        ));
    }
}
