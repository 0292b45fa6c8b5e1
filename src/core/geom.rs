//! core::geom
//!
//! Geometric helpers shared by the validators.
//!
//! # Rounding
//!
//! Marker coordinates are surveyed to the decimetre. Comparisons between
//! line vertices and marker points are made on coordinates rounded to one
//! decimal, represented as integer decimetre keys ([`RoundedCoord`]) so
//! that equality never depends on float representation.
//!
//! # Predicates
//!
//! - [`is_simple`] - a linestring neither self-touches nor self-crosses
//! - [`crosses`] - DE-9IM "crosses" between two geometries
//! - [`contains`] - DE-9IM "contains" between two geometries
//!
//! The DE-9IM predicates come from `geo::Relate`; the simplicity test is a
//! pairwise segment sweep over `geo`'s segment intersection.

use geo::algorithm::line_intersection::{line_intersection, LineIntersection};
use geo::{Coord, Geometry, Line, LineString, Relate};

/// Maximum distance between a coordinate and its 1-decimal rounding.
pub const DECIMAL_TOLERANCE: f64 = 0.01;

/// Round a value to one decimal place (half away from zero).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Absolute distance between a value and its 1-decimal rounding.
pub fn decimal_deviation(value: f64) -> f64 {
    (value - round1(value)).abs()
}

/// Check that both coordinates sit within [`DECIMAL_TOLERANCE`] of their
/// 1-decimal rounding.
///
/// # Example
///
/// ```
/// use cqline::core::geom::is_decimetre_rounded;
///
/// assert!(is_decimetre_rounded(123.4, 456.7));
/// assert!(is_decimetre_rounded(123.405, 456.7));
/// assert!(!is_decimetre_rounded(123.456, 456.7));
/// ```
pub fn is_decimetre_rounded(x: f64, y: f64) -> bool {
    decimal_deviation(x) <= DECIMAL_TOLERANCE && decimal_deviation(y) <= DECIMAL_TOLERANCE
}

/// A coordinate rounded to one decimal, stored as integer decimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoundedCoord {
    x_dm: i64,
    y_dm: i64,
}

impl RoundedCoord {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x_dm: (x * 10.0).round() as i64,
            y_dm: (y * 10.0).round() as i64,
        }
    }

    pub fn of(coord: Coord<f64>) -> Self {
        Self::new(coord.x, coord.y)
    }

    pub fn x(&self) -> f64 {
        self.x_dm as f64 / 10.0
    }

    pub fn y(&self) -> f64 {
        self.y_dm as f64 / 10.0
    }
}

impl std::fmt::Display for RoundedCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x(), self.y())
    }
}

/// Check whether a linestring is simple.
///
/// A linestring is simple when no two of its segments meet anywhere other
/// than the vertex they share as neighbours. A closed linestring may also
/// meet itself at the closing vertex. Repeated consecutive vertices are
/// ignored; degenerate linestrings (fewer than two distinct vertices) are
/// considered simple here and reported by the geometry checks instead.
///
/// # Example
///
/// ```
/// use cqline::core::geom::is_simple;
/// use geo::line_string;
///
/// let straight = line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 2.0, y: 1.0)];
/// assert!(is_simple(&straight));
///
/// let bowtie = line_string![
///     (x: 0.0, y: 0.0), (x: 2.0, y: 2.0), (x: 2.0, y: 0.0), (x: 0.0, y: 2.0)
/// ];
/// assert!(!is_simple(&bowtie));
/// ```
pub fn is_simple(line: &LineString<f64>) -> bool {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(line.0.len());
    for c in line.coords() {
        if coords.last() != Some(c) {
            coords.push(*c);
        }
    }
    if coords.len() < 3 {
        return true;
    }

    let closed = coords.first() == coords.last();
    let segments: Vec<Line<f64>> = coords.windows(2).map(|w| Line::new(w[0], w[1])).collect();
    let last = segments.len() - 1;

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let shared = if j == i + 1 {
                Some(segments[i].end)
            } else if closed && i == 0 && j == last {
                Some(segments[i].start)
            } else {
                None
            };

            match line_intersection(segments[i], segments[j]) {
                None => {}
                Some(LineIntersection::SinglePoint { intersection, .. }) => {
                    if shared != Some(intersection) {
                        return false;
                    }
                }
                Some(LineIntersection::Collinear { .. }) => return false,
            }
        }
    }

    true
}

/// DE-9IM "crosses": interiors meet in a lower dimension than the inputs.
///
/// For two linestrings this is true when they cut through each other at
/// an interior point; sharing an endpoint is a touch, not a cross.
pub fn crosses(a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    a.relate(b).is_crosses()
}

/// DE-9IM "contains": `b` lies in `a` and their interiors meet.
pub fn contains(a: &Geometry<f64>, b: &Geometry<f64>) -> bool {
    a.relate(b).is_contains()
}
