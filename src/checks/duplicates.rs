//! checks::duplicates
//!
//! Whether the line being checked already exists in the reference layers.

use crate::engine::report::Report;
use crate::store::entity::{REFERENCE_LINES, REFERENCE_MARKERS};

use super::CheckContext;

pub fn check(ctx: &CheckContext<'_>, report: &mut Report) {
    let line = ctx.line;
    match (ctx.reference.has_markers(line), ctx.reference.has_line(line)) {
        (true, true) => report.error(format!(
            "Line {line} already exists in {REFERENCE_MARKERS} and {REFERENCE_LINES}"
        )),
        (true, false) => report.error(format!(
            "Line {line} already exists in {REFERENCE_MARKERS} but not in {REFERENCE_LINES}"
        )),
        (false, true) => report.error(format!(
            "Line {line} already exists in {REFERENCE_LINES} but not in {REFERENCE_MARKERS}"
        )),
        (false, false) => report.info(format!(
            "Line {line} is in neither {REFERENCE_MARKERS} nor {REFERENCE_LINES}"
        )),
    }
}
