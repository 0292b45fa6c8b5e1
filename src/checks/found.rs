//! checks::found
//!
//! Bookkeeping of markers physically located in the field.
//!
//! Runs only when at least one final marker is recorded as found
//! (`TROBADA`). Three rules, each reported per offending marker:
//!
//! 1. A found marker carries a photo filename (`FOTOS`).
//! 2. Every photo filename on a final marker exists in the photo folder.
//! 3. A final marker with a positive Z was surveyed on site, so it must
//!    be found.

use crate::engine::report::Report;
use crate::store::entity::FOUND_MARKERS;

use super::CheckContext;

pub fn check(ctx: &CheckContext<'_>, report: &mut Report) {
    if ctx.found().is_empty() {
        report.info(format!(
            "No found markers in {FOUND_MARKERS}, found-marker checks skipped"
        ));
        return;
    }

    photo_present(ctx, report);
    photo_exists(ctx, report);
    height_implies_found(ctx, report);
}

fn photo_present(ctx: &CheckContext<'_>, report: &mut Report) {
    let before = report.error_count();
    for record in ctx.found() {
        let photo = ctx
            .layers
            .point(&record.point_id)
            .and_then(|p| p.photo.as_deref())
            .filter(|p| !p.trim().is_empty());
        if photo.is_none() {
            report.error(format!(
                "Found marker {} | ID_PUNT {} has no photo",
                record.marker_number, record.point_id
            ));
        }
    }
    if report.error_count() == before {
        report.info("Every found marker has a photo");
    }
}

fn photo_exists(ctx: &CheckContext<'_>, report: &mut Report) {
    let before = report.error_count();
    for point in ctx.final_points() {
        let Some(photo) = point.photo.as_deref().map(str::trim) else {
            continue;
        };
        if !photo.is_empty() && !ctx.photos.contains(photo) {
            report.error(format!(
                "Photo {photo} of marker {} | ID_PUNT {} is not in the photo folder",
                point.label, point.id
            ));
        }
    }
    if report.error_count() == before {
        report.info("Every referenced photo is in the photo folder");
    }
}

fn height_implies_found(ctx: &CheckContext<'_>, report: &mut Report) {
    let before = report.error_count();
    for point in ctx.final_points() {
        let has_height = point.position.is_some_and(|p| p.has_positive_z());
        if has_height && !ctx.is_found(&point.id) {
            report.error(format!(
                "Marker {} | ID_PUNT {} has a Z coordinate but is not recorded as found",
                point.label, point.id
            ));
        }
    }
    if report.error_count() == before {
        report.info("Every marker with a Z coordinate is recorded as found");
    }
}
