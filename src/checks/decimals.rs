//! checks::decimals
//!
//! Final markers must be surveyed to the decimetre: each planimetric
//! coordinate within [`DECIMAL_TOLERANCE`] of its 1-decimal rounding.
//! Points without a usable position are left to the geometry check.

use crate::core::geom::{is_decimetre_rounded, DECIMAL_TOLERANCE};
use crate::engine::report::Report;

use super::CheckContext;

pub fn check(ctx: &CheckContext<'_>, report: &mut Report) {
    let before = report.error_count();

    for point in ctx.final_points() {
        let Some(position) = point.position.filter(|p| p.is_valid()) else {
            continue;
        };
        if !is_decimetre_rounded(position.x, position.y) {
            report.error(format!(
                "Marker {} | ID_PUNT {} is not rounded to decimetres ({}, {})",
                point.label, point.id, position.x, position.y
            ));
        }
    }

    if report.error_count() == before {
        report.info(format!(
            "Final marker coordinates are rounded to decimetres (tolerance {DECIMAL_TOLERANCE})"
        ));
    }
}
