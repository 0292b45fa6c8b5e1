//! checks
//!
//! The validators run by the pipeline.
//!
//! # Architecture
//!
//! Every check is a plain function reading a [`CheckContext`] and appending
//! entries to a [`Report`]. Checks never fail and never stop the run; a
//! violation is an `error` entry, a clean result is usually an `info`
//! entry. The schema gate is the one exception and lives in the
//! orchestrator (see [`schema::missing_fields`]).
//!
//! [`CHECKS`] fixes the order, which fixes the order of the report for a
//! given input.
//!
//! # Modules
//!
//! - [`schema`] - line layer field set and content
//! - [`duplicates`] - line id already in the reference layers
//! - [`geometry`] - empty, ring, multi-part, invalid; vertex census
//! - [`decimals`] - decimetre rounding of final markers
//! - [`proposal`] - `P_Proposta` counts and consistency
//! - [`found`] - photos and heights of found markers
//! - [`contact`] - three-municipality (3T) markers
//! - [`relations`] - table rows referencing missing points
//! - [`topology`] - self-intersection, reference conflicts, endpoints,
//!   auxiliary points

pub mod contact;
pub mod decimals;
pub mod duplicates;
pub mod found;
pub mod geometry;
pub mod proposal;
pub mod relations;
pub mod schema;
pub mod topology;

use std::collections::{BTreeSet, HashSet};

use crate::core::geom::RoundedCoord;
use crate::core::types::{LineId, PointId};
use crate::engine::report::Report;
use crate::reference::ReferenceData;
use crate::store::{FoundMarkerRecord, LayerStore, MarkerPoint};

/// Read-only inputs shared by every check of one run.
///
/// Derived sets (final points, found markers, line vertices) are computed
/// once here instead of in each check.
#[derive(Debug)]
pub struct CheckContext<'a> {
    pub line: LineId,
    pub layers: &'a LayerStore,
    pub reference: &'a ReferenceData,
    pub photos: &'a BTreeSet<String>,
    final_points: HashSet<PointId>,
    found: Vec<&'a FoundMarkerRecord>,
    line_vertices: HashSet<RoundedCoord>,
}

impl<'a> CheckContext<'a> {
    pub fn new(
        line: LineId,
        layers: &'a LayerStore,
        reference: &'a ReferenceData,
        photos: &'a BTreeSet<String>,
    ) -> Self {
        let final_points: HashSet<PointId> = layers
            .proposals()
            .iter()
            .filter(|p| p.is_final)
            .map(|p| p.point_id.clone())
            .collect();

        let found = layers
            .found_markers()
            .iter()
            .filter(|r| r.found && final_points.contains(&r.point_id))
            .collect();

        let line_vertices = layers
            .segments()
            .iter()
            .flat_map(|s| s.geometry.coords())
            .map(RoundedCoord::of)
            .collect();

        Self {
            line,
            layers,
            reference,
            photos,
            final_points,
            found,
            line_vertices,
        }
    }

    /// The point belongs to the final proposed line (PPF).
    pub fn is_final(&self, id: &PointId) -> bool {
        self.final_points.contains(id)
    }

    /// Final points of the point layer, in layer order.
    pub fn final_points(&self) -> impl Iterator<Item = &'a MarkerPoint> + '_ {
        self.layers
            .points()
            .iter()
            .filter(move |p| self.is_final(&p.id))
    }

    /// Found-marker records of final points, in table order.
    pub fn found(&self) -> &[&'a FoundMarkerRecord] {
        &self.found
    }

    pub fn is_found(&self, id: &PointId) -> bool {
        self.found.iter().any(|r| &r.point_id == id)
    }

    /// A rounded coordinate coincides with a vertex of the submitted line.
    pub fn on_line(&self, coord: RoundedCoord) -> bool {
        self.line_vertices.contains(&coord)
    }
}

/// A named check.
#[derive(Clone, Copy)]
pub struct Check {
    pub name: &'static str,
    pub run: fn(&CheckContext<'_>, &mut Report),
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check").field("name", &self.name).finish()
    }
}

/// Every non-gating check, in report order.
pub const CHECKS: [Check; 14] = [
    Check {
        name: "schema-content",
        run: schema::check_content,
    },
    Check {
        name: "duplicate-line-id",
        run: duplicates::check,
    },
    Check {
        name: "layer-geometry",
        run: geometry::check_layers,
    },
    Check {
        name: "vertex-census",
        run: geometry::vertex_census,
    },
    Check {
        name: "decimals",
        run: decimals::check,
    },
    Check {
        name: "proposal-table",
        run: proposal::check,
    },
    Check {
        name: "found-markers",
        run: found::check,
    },
    Check {
        name: "three-municipality",
        run: contact::check,
    },
    Check {
        name: "relations",
        run: relations::check,
    },
    Check {
        name: "self-intersection",
        run: topology::self_intersection,
    },
    Check {
        name: "intersects-reference",
        run: topology::intersects_reference,
    },
    Check {
        name: "overlaps-reference",
        run: topology::overlaps_reference,
    },
    Check {
        name: "endpoint-coverage",
        run: topology::endpoint_coverage,
    },
    Check {
        name: "auxiliary-points",
        run: topology::auxiliary_points,
    },
];
