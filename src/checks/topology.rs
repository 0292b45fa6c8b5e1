//! checks::topology
//!
//! Geometric relations of the submitted line with itself, with the
//! reference line layer, and with its marker points.
//!
//! # Checks
//!
//! - [`self_intersection`]: each segment is simple, and no two segments
//!   of the line cross each other (one entry per unordered pair)
//! - [`intersects_reference`] / [`overlaps_reference`]: a segment
//!   containing a reference segment (`tram_linia_mem`). Both run the same
//!   DE-9IM test and report each match under their own heading.
//! - [`endpoint_coverage`]: both endpoints of every segment sit on a
//!   marker point, compared on 1-decimal rounded coordinates
//! - [`auxiliary_points`]: marker points off the line must be final
//!   auxiliary points

use std::collections::HashSet;

use geo::Geometry;

use crate::core::geom::{self, RoundedCoord};
use crate::engine::report::Report;
use crate::store::entity::{FOUND_MARKERS, MARKER_POINTS, REFERENCE_LINES};
use crate::store::LineFeature;

use super::CheckContext;

pub fn self_intersection(ctx: &CheckContext<'_>, report: &mut Report) {
    report.info("Starting topology checks");

    let before = report.error_count();
    let segments = ctx.layers.segments();

    for segment in segments {
        if segment.geometry.parts().into_iter().any(|ls| !geom::is_simple(ls)) {
            report.error(format!(
                "Segment {} intersects or touches itself",
                segment.id
            ));
        }
    }

    let shapes: Vec<(&LineFeature, Geometry<f64>)> = with_shapes(segments);
    for (i, (a, ga)) in shapes.iter().enumerate() {
        for (b, gb) in &shapes[i + 1..] {
            if geom::crosses(ga, gb) {
                report.error(format!("Segment {} crosses segment {}", a.id, b.id));
            }
        }
    }

    if report.error_count() == before {
        report.info("No segment intersects itself or another segment of the line");
    }
}

pub fn intersects_reference(ctx: &CheckContext<'_>, report: &mut Report) {
    against_reference(ctx, report, "intersects");
}

pub fn overlaps_reference(ctx: &CheckContext<'_>, report: &mut Report) {
    against_reference(ctx, report, "overlaps");
}

fn against_reference(ctx: &CheckContext<'_>, report: &mut Report, relation: &str) {
    let before = report.error_count();
    let reference: Vec<Geometry<f64>> = ctx
        .reference
        .lines
        .iter()
        .filter_map(|l| l.geometry.to_geometry())
        .collect();

    for (segment, shape) in with_shapes(ctx.layers.segments()) {
        for other in &reference {
            if geom::contains(&shape, other) {
                report.error(format!(
                    "Segment {} {relation} a segment of {REFERENCE_LINES}",
                    segment.id
                ));
            }
        }
    }

    if report.error_count() == before {
        report.info(format!("No segment {relation} {REFERENCE_LINES}"));
    }
}

pub fn endpoint_coverage(ctx: &CheckContext<'_>, report: &mut Report) {
    let markers: HashSet<RoundedCoord> = ctx
        .layers
        .points()
        .iter()
        .filter_map(|p| p.rounded())
        .collect();

    let before = report.error_count();
    for segment in ctx.layers.segments() {
        let Some((first, last)) = segment.geometry.endpoints() else {
            continue;
        };
        let mut unmatched: Vec<RoundedCoord> = [first, last]
            .into_iter()
            .map(RoundedCoord::of)
            .filter(|c| !markers.contains(c))
            .collect();
        unmatched.dedup();
        if !unmatched.is_empty() {
            let coords: Vec<String> = unmatched.iter().map(ToString::to_string).collect();
            report.error(format!(
                "Segment {} has endpoints without a marker in {MARKER_POINTS}: {}",
                segment.id,
                coords.join(", ")
            ));
        }
    }

    if report.error_count() == before {
        report.info(format!(
            "Every segment endpoint has a marker in {MARKER_POINTS}"
        ));
    }
}

pub fn auxiliary_points(ctx: &CheckContext<'_>, report: &mut Report) {
    let before = report.len();

    for point in ctx.layers.points() {
        let Some(coord) = point.rounded() else {
            continue;
        };
        if ctx.on_line(coord) || !ctx.is_final(&point.id) {
            continue;
        }
        match ctx.layers.found_marker(&point.id) {
            Some(record) if record.auxiliary => report.info(format!(
                "Marker {} | ID_PUNT {} is off the line and is auxiliary",
                record.marker_number, point.id
            )),
            Some(record) => report.error(format!(
                "Marker {} | ID_PUNT {} is off the line and is not auxiliary",
                record.marker_number, point.id
            )),
            None => report.error(format!(
                "Marker {} | ID_PUNT {} is off the line and has no {FOUND_MARKERS} record",
                point.label, point.id
            )),
        }
    }

    if report.len() == before {
        report.info("Every final marker lies on the line");
    }
}

fn with_shapes(segments: &[LineFeature]) -> Vec<(&LineFeature, Geometry<f64>)> {
    segments
        .iter()
        .filter_map(|s| s.geometry.to_geometry().map(|g| (s, g)))
        .collect()
}
