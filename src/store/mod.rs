//! store
//!
//! The Layer Store: typed, in-memory layers for one pipeline run.
//!
//! # Architecture
//!
//! Ingestion reads each entity as a [`RawLayer`] and converts it once into
//! explicit record types:
//!
//! | Entity          | Record                | Role                              |
//! |-----------------|-----------------------|-----------------------------------|
//! | `Lin_TramPpta`  | [`LineFeature`]       | submitted line segments           |
//! | `Punt`          | [`MarkerPoint`]       | submitted marker points           |
//! | `P_Proposta`    | [`ProposalRecord`]    | proposal classification per point |
//! | `PUNT_FIT`      | [`FoundMarkerRecord`] | field survey bookkeeping          |
//!
//! Validators only ever see these records, never open-ended key lookups.
//!
//! The line layer is converted leniently: its field set is governed by
//! the schema validator, which must be able to report a missing field as
//! a gating failure rather than a load failure. The point layer and both
//! tables require their fields at load time.
//!
//! # Ownership
//!
//! A `LayerStore` belongs to exactly one run. It is built by ingestion,
//! moved into the pipeline, and dropped with the run.

pub mod raw;

use std::path::PathBuf;

use geo::{Coord, Geometry, LineString, MultiLineString};
use thiserror::Error;

use crate::core::geom::RoundedCoord;
use crate::core::types::{Label, LineId, PointId, SegmentId};

pub use raw::{FieldRef, RawFeature, RawGeometry, RawLayer};

/// Names of the entities handled by the pipeline.
pub mod entity {
    /// Submitted line segments (layer).
    pub const LINE_SEGMENTS: &str = "Lin_TramPpta";
    /// Submitted marker points (layer).
    pub const MARKER_POINTS: &str = "Punt";
    /// Proposal classification (table).
    pub const PROPOSALS: &str = "P_Proposta";
    /// Found-marker bookkeeping (table).
    pub const FOUND_MARKERS: &str = "PUNT_FIT";
    /// Persisted reference lines.
    pub const REFERENCE_LINES: &str = "tram_linia_mem";
    /// Persisted reference markers.
    pub const REFERENCE_MARKERS: &str = "fita_mem";

    /// Layers expected in the cartography folder.
    pub const LAYERS: [&str; 2] = [LINE_SEGMENTS, MARKER_POINTS];
    /// Tables expected in the tables folder.
    pub const TABLES: [&str; 2] = [PROPOSALS, FOUND_MARKERS];
}

/// Errors from loading raw entities into typed records.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {entity} from '{path}': {source}")]
    Read {
        entity: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{entity} is not a valid layer document: {message}")]
    Parse { entity: String, message: String },

    #[error("{entity} has no field '{field}'")]
    MissingField { entity: String, field: String },

    #[error("{entity}, feature {index}, field '{field}': {message}")]
    InvalidValue {
        entity: String,
        index: usize,
        field: String,
        message: String,
    },

    #[error("{entity}, feature {index}: {message}")]
    InvalidGeometry {
        entity: String,
        index: usize,
        message: String,
    },
}

impl LoadError {
    /// The entity the error refers to.
    pub fn entity(&self) -> &str {
        match self {
            LoadError::Read { entity, .. }
            | LoadError::Parse { entity, .. }
            | LoadError::MissingField { entity, .. }
            | LoadError::InvalidValue { entity, .. }
            | LoadError::InvalidGeometry { entity, .. } => entity,
        }
    }
}

// =============================================================================
// Geometry values
// =============================================================================

/// Geometry of a line segment.
#[derive(Debug, Clone, PartialEq)]
pub enum LineGeometry {
    /// No vertices (null or empty geometry).
    Empty,
    /// A single linestring.
    Single(LineString<f64>),
    /// A multi-part geometry. Never valid for a submitted segment.
    Multi(MultiLineString<f64>),
}

impl LineGeometry {
    pub fn is_empty(&self) -> bool {
        match self {
            LineGeometry::Empty => true,
            LineGeometry::Single(ls) => ls.0.is_empty(),
            LineGeometry::Multi(mls) => mls.0.iter().all(|ls| ls.0.is_empty()),
        }
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, LineGeometry::Multi(_))
    }

    /// Number of parts (0 for empty).
    pub fn part_count(&self) -> usize {
        match self {
            LineGeometry::Empty => 0,
            LineGeometry::Single(_) => 1,
            LineGeometry::Multi(mls) => mls.0.len(),
        }
    }

    /// A geometry whose first and last vertex coincide.
    pub fn is_ring(&self) -> bool {
        match self {
            LineGeometry::Single(ls) => ls.0.len() > 2 && ls.is_closed(),
            LineGeometry::Multi(mls) => mls.0.iter().any(|ls| ls.0.len() > 2 && ls.is_closed()),
            LineGeometry::Empty => false,
        }
    }

    /// All vertices in order, across parts.
    pub fn coords(&self) -> Box<dyn Iterator<Item = Coord<f64>> + '_> {
        match self {
            LineGeometry::Empty => Box::new(std::iter::empty()),
            LineGeometry::Single(ls) => Box::new(ls.coords().copied()),
            LineGeometry::Multi(mls) => Box::new(mls.0.iter().flat_map(|ls| ls.coords().copied())),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.coords().count()
    }

    /// First and last vertex of the geometry.
    pub fn endpoints(&self) -> Option<(Coord<f64>, Coord<f64>)> {
        let mut coords = self.coords();
        let first = coords.next()?;
        let last = coords.last().unwrap_or(first);
        Some((first, last))
    }

    /// The parts as linestrings.
    pub fn parts(&self) -> Vec<&LineString<f64>> {
        match self {
            LineGeometry::Empty => vec![],
            LineGeometry::Single(ls) => vec![ls],
            LineGeometry::Multi(mls) => mls.0.iter().collect(),
        }
    }

    /// Convert for use with DE-9IM predicates.
    pub fn to_geometry(&self) -> Option<Geometry<f64>> {
        match self {
            LineGeometry::Empty => None,
            _ if self.is_empty() => None,
            LineGeometry::Single(ls) => Some(Geometry::LineString(ls.clone())),
            LineGeometry::Multi(mls) => Some(Geometry::MultiLineString(mls.clone())),
        }
    }
}

/// Position of a marker point. `z` is the surveyed height, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointGeometry {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl PointGeometry {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }

    /// All present coordinates are finite.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.map_or(true, f64::is_finite)
    }

    pub fn rounded(&self) -> RoundedCoord {
        RoundedCoord::new(self.x, self.y)
    }

    pub fn has_positive_z(&self) -> bool {
        self.z.is_some_and(|z| z > 0.0)
    }
}

// =============================================================================
// Records
// =============================================================================

/// A submitted line segment (tram).
#[derive(Debug, Clone, PartialEq)]
pub struct LineFeature {
    pub id: SegmentId,
    /// Raw `ID_LINIA` value.
    pub line_id: Option<String>,
    pub geometry: LineGeometry,
    /// Endpoint marker references (`ID_FITA1`, `ID_FITA2`).
    pub endpoint_markers: [Option<String>; 2],
    /// Intermediate vertex markers (`P1`..`P4`).
    pub intermediate_markers: [Option<String>; 4],
    /// Final vertex marker (`PF`).
    pub final_marker: Option<String>,
    pub comment: Option<String>,
    pub date: Option<String>,
}

impl LineFeature {
    /// Minimal segment with only an id, owning line and geometry.
    pub fn new(id: impl Into<String>, line_id: LineId, geometry: LineGeometry) -> Self {
        Self {
            id: SegmentId::new(id),
            line_id: Some(line_id.to_string()),
            geometry,
            endpoint_markers: [None, None],
            intermediate_markers: [None, None, None, None],
            final_marker: None,
            comment: None,
            date: None,
        }
    }

    pub fn with_endpoint_markers(mut self, first: &str, second: &str) -> Self {
        self.endpoint_markers = [Some(first.to_string()), Some(second.to_string())];
        self
    }

    /// Check whether `ID_LINIA` names the given line.
    ///
    /// The value is compared numerically, so `"0042"` belongs to line 42.
    pub fn belongs_to(&self, line: LineId) -> bool {
        self.line_id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .is_some_and(|v| v == u64::from(line.get()))
    }
}

/// A submitted marker point (punt).
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerPoint {
    pub id: PointId,
    pub label: Label,
    /// `None` for an empty geometry.
    pub position: Option<PointGeometry>,
    /// Photo filename (`FOTOS`).
    pub photo: Option<String>,
    /// Three-municipality contact attribute (`CONTACTE`).
    pub contact: Option<String>,
}

impl MarkerPoint {
    pub fn new(id: PointId, label: impl Into<String>, position: PointGeometry) -> Self {
        Self {
            id,
            label: Label::new(label),
            position: Some(position),
            photo: None,
            contact: None,
        }
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn rounded(&self) -> Option<RoundedCoord> {
        self.position.filter(PointGeometry::is_valid).map(|p| p.rounded())
    }
}

/// Proposal classification of a point (`P_Proposta`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRecord {
    pub point_id: PointId,
    /// `PFF`: belongs to the final proposed line.
    pub is_final: bool,
    /// `ESFITA`: a real boundary marker rather than an auxiliary point.
    pub is_real_marker: bool,
    /// `ORDPF`: ordering value; must never be null.
    pub order: Option<i64>,
}

/// Field survey bookkeeping of a point (`PUNT_FIT`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundMarkerRecord {
    pub point_id: PointId,
    /// `ID_FITA`: marker number along the line.
    pub marker_number: String,
    /// `TROBADA`: physically located in the field.
    pub found: bool,
    /// `AUX`: auxiliary point.
    pub auxiliary: bool,
}

// =============================================================================
// Layer store
// =============================================================================

/// Raw entities of a submission, before conversion.
#[derive(Debug, Clone, Default)]
pub struct RawLayers {
    pub segments: RawLayer,
    pub points: RawLayer,
    pub proposals: RawLayer,
    pub found_markers: RawLayer,
}

/// Typed layers for one run.
#[derive(Debug, Clone, Default)]
pub struct LayerStore {
    line_fields: Vec<String>,
    segments: Vec<LineFeature>,
    points: Vec<MarkerPoint>,
    proposals: Vec<ProposalRecord>,
    found_markers: Vec<FoundMarkerRecord>,
}

/// Fields the line layer must declare.
pub const LINE_SCHEMA: [&str; 12] = [
    "ID_LINIA", "ID", "DATA", "COMENTARI", "P1", "P2", "P3", "P4", "PF", "ID_FITA1", "ID_FITA2",
    "geometry",
];

const POINT_FIELDS: [&str; 4] = ["ID_PUNT", "ETIQUETA", "FOTOS", "CONTACTE"];
const PROPOSAL_FIELDS: [&str; 4] = ["ID_PUNT", "PFF", "ESFITA", "ORDPF"];
const FOUND_MARKER_FIELDS: [&str; 4] = ["ID_PUNT", "ID_FITA", "TROBADA", "AUX"];

impl LayerStore {
    /// Build a store from already-typed records.
    pub fn new(
        line_fields: Vec<String>,
        segments: Vec<LineFeature>,
        points: Vec<MarkerPoint>,
        proposals: Vec<ProposalRecord>,
        found_markers: Vec<FoundMarkerRecord>,
    ) -> Self {
        Self {
            line_fields,
            segments,
            points,
            proposals,
            found_markers,
        }
    }

    /// Convert raw entities into typed records.
    ///
    /// # Errors
    ///
    /// Returns the first `LoadError` found. The line layer's declared
    /// fields are not checked here (see [`crate::checks::schema`]).
    pub fn from_raw(raw: &RawLayers) -> Result<Self, LoadError> {
        let segments = raw
            .segments
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| segment_from_raw(i, f))
            .collect::<Result<Vec<_>, _>>()?;

        raw.points
            .require_fields(entity::MARKER_POINTS, &POINT_FIELDS)?;
        let points = raw
            .points
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| point_from_raw(i, f))
            .collect::<Result<Vec<_>, _>>()?;

        raw.proposals
            .require_fields(entity::PROPOSALS, &PROPOSAL_FIELDS)?;
        let proposals = raw
            .proposals
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| proposal_from_raw(i, f))
            .collect::<Result<Vec<_>, _>>()?;

        raw.found_markers
            .require_fields(entity::FOUND_MARKERS, &FOUND_MARKER_FIELDS)?;
        let found_markers = raw
            .found_markers
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| found_marker_from_raw(i, f))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            line_fields: raw.segments.fields.clone(),
            segments,
            points,
            proposals,
            found_markers,
        })
    }

    /// Declared fields of the line layer.
    pub fn line_fields(&self) -> &[String] {
        &self.line_fields
    }

    pub fn segments(&self) -> &[LineFeature] {
        &self.segments
    }

    pub fn points(&self) -> &[MarkerPoint] {
        &self.points
    }

    pub fn proposals(&self) -> &[ProposalRecord] {
        &self.proposals
    }

    pub fn found_markers(&self) -> &[FoundMarkerRecord] {
        &self.found_markers
    }

    pub fn point(&self, id: &PointId) -> Option<&MarkerPoint> {
        self.points.iter().find(|p| &p.id == id)
    }

    /// First found-marker record for a point.
    pub fn found_marker(&self, id: &PointId) -> Option<&FoundMarkerRecord> {
        self.found_markers.iter().find(|r| &r.point_id == id)
    }
}

// =============================================================================
// Conversion
// =============================================================================

fn point_id(entity: &str, index: usize, feature: &RawFeature) -> Result<PointId, LoadError> {
    let raw = feature.text("ID_PUNT").unwrap_or_default();
    PointId::new(raw).map_err(|e| LoadError::InvalidValue {
        entity: entity.to_string(),
        index,
        field: "ID_PUNT".to_string(),
        message: e.to_string(),
    })
}

fn coord(entity: &str, index: usize, values: &[f64]) -> Result<Coord<f64>, LoadError> {
    match values {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(LoadError::InvalidGeometry {
            entity: entity.to_string(),
            index,
            message: format!("position needs at least 2 values, got {}", values.len()),
        }),
    }
}

fn linestring(entity: &str, index: usize, raw: &[Vec<f64>]) -> Result<LineString<f64>, LoadError> {
    raw.iter()
        .map(|c| coord(entity, index, c))
        .collect::<Result<Vec<_>, _>>()
        .map(LineString::new)
}

/// Convert a raw geometry expected to be a line.
pub(crate) fn line_geometry(
    e: &str,
    index: usize,
    raw: Option<&RawGeometry>,
) -> Result<LineGeometry, LoadError> {
    Ok(match raw {
        None => LineGeometry::Empty,
        Some(RawGeometry::LineString(coords)) => LineGeometry::Single(linestring(e, index, coords)?),
        Some(RawGeometry::MultiLineString(parts)) => LineGeometry::Multi(MultiLineString::new(
            parts
                .iter()
                .map(|p| linestring(e, index, p))
                .collect::<Result<Vec<_>, _>>()?,
        )),
        Some(RawGeometry::Point(_)) => {
            return Err(LoadError::InvalidGeometry {
                entity: e.to_string(),
                index,
                message: "expected a line geometry, got a point".to_string(),
            })
        }
    })
}

/// Convert a raw geometry expected to be a point. Empty yields `None`.
pub(crate) fn point_geometry(
    e: &str,
    index: usize,
    raw: Option<&RawGeometry>,
) -> Result<Option<PointGeometry>, LoadError> {
    match raw {
        None => Ok(None),
        Some(RawGeometry::Point(values)) if values.is_empty() => Ok(None),
        Some(RawGeometry::Point(values)) => {
            let c = coord(e, index, values)?;
            Ok(Some(PointGeometry {
                x: c.x,
                y: c.y,
                z: values.get(2).copied(),
            }))
        }
        Some(_) => Err(LoadError::InvalidGeometry {
            entity: e.to_string(),
            index,
            message: "expected a point geometry".to_string(),
        }),
    }
}

fn segment_from_raw(index: usize, f: &RawFeature) -> Result<LineFeature, LoadError> {
    let geometry = line_geometry(entity::LINE_SEGMENTS, index, f.geometry.as_ref())?;

    Ok(LineFeature {
        id: SegmentId::new(f.text("ID").unwrap_or_else(|| format!("#{}", index + 1))),
        line_id: f.text("ID_LINIA"),
        geometry,
        endpoint_markers: [f.text("ID_FITA1"), f.text("ID_FITA2")],
        intermediate_markers: [f.text("P1"), f.text("P2"), f.text("P3"), f.text("P4")],
        final_marker: f.text("PF"),
        comment: f.text("COMENTARI"),
        date: f.text("DATA"),
    })
}

fn point_from_raw(index: usize, f: &RawFeature) -> Result<MarkerPoint, LoadError> {
    let e = entity::MARKER_POINTS;
    let position = point_geometry(e, index, f.geometry.as_ref())?;

    Ok(MarkerPoint {
        id: point_id(e, index, f)?,
        label: Label::new(f.text("ETIQUETA").unwrap_or_default()),
        position,
        photo: f.text("FOTOS"),
        contact: f.text("CONTACTE"),
    })
}

fn proposal_from_raw(index: usize, f: &RawFeature) -> Result<ProposalRecord, LoadError> {
    let e = entity::PROPOSALS;
    let at = |field| FieldRef {
        entity: e,
        index,
        field,
    };
    Ok(ProposalRecord {
        point_id: point_id(e, index, f)?,
        is_final: f.flag(at("PFF"))?,
        is_real_marker: f.flag(at("ESFITA"))?,
        order: f.integer(at("ORDPF"))?,
    })
}

fn found_marker_from_raw(index: usize, f: &RawFeature) -> Result<FoundMarkerRecord, LoadError> {
    let e = entity::FOUND_MARKERS;
    let at = |field| FieldRef {
        entity: e,
        index,
        field,
    };
    Ok(FoundMarkerRecord {
        point_id: point_id(e, index, f)?,
        marker_number: f.text("ID_FITA").unwrap_or_default(),
        found: f.flag(at("TROBADA"))?,
        auxiliary: f.flag(at("AUX"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_string;

    fn layer(text: &str) -> RawLayer {
        RawLayer::from_json("test", text).unwrap()
    }

    fn minimal_raw() -> RawLayers {
        RawLayers {
            segments: layer(
                r#"{"fields": ["ID_LINIA", "ID", "geometry"],
                    "features": [{"properties": {"ID_LINIA": 42, "ID": 1, "ID_FITA1": "P-1"},
                                  "geometry": {"type": "LineString", "coordinates": [[0, 0], [10, 0]]}}]}"#,
            ),
            points: layer(
                r#"{"fields": ["ID_PUNT", "ETIQUETA", "FOTOS", "CONTACTE", "geometry"],
                    "features": [{"properties": {"ID_PUNT": "P-1", "ETIQUETA": "F-1", "CONTACTE": " "},
                                  "geometry": {"type": "Point", "coordinates": [0, 0, 12.5]}}]}"#,
            ),
            proposals: layer(
                r#"{"fields": ["ID_PUNT", "PFF", "ESFITA", "ORDPF"],
                    "features": [{"properties": {"ID_PUNT": "P-1", "PFF": 1, "ESFITA": "1", "ORDPF": null}}]}"#,
            ),
            found_markers: layer(
                r#"{"fields": ["ID_PUNT", "ID_FITA", "TROBADA", "AUX"],
                    "features": [{"properties": {"ID_PUNT": "P-1", "ID_FITA": "1", "TROBADA": "1", "AUX": "0"}}]}"#,
            ),
        }
    }

    #[test]
    fn converts_minimal_submission() {
        let store = LayerStore::from_raw(&minimal_raw()).unwrap();

        let seg = &store.segments()[0];
        assert_eq!(seg.id.as_str(), "1");
        assert!(seg.belongs_to(LineId::new(42).unwrap()));
        assert_eq!(seg.endpoint_markers[0].as_deref(), Some("P-1"));
        assert_eq!(seg.endpoint_markers[1], None);

        let point = &store.points()[0];
        assert_eq!(point.position.unwrap().z, Some(12.5));
        assert_eq!(point.contact, None);

        let proposal = &store.proposals()[0];
        assert!(proposal.is_final && proposal.is_real_marker);
        assert_eq!(proposal.order, None);

        assert!(store.found_markers()[0].found);
        assert!(!store.found_markers()[0].auxiliary);
    }

    #[test]
    fn line_layer_missing_fields_still_loads() {
        let store = LayerStore::from_raw(&minimal_raw()).unwrap();
        assert_eq!(store.line_fields(), ["ID_LINIA", "ID", "geometry"]);
    }

    #[test]
    fn table_missing_field_fails() {
        let mut raw = minimal_raw();
        raw.found_markers.fields.retain(|f| f != "AUX");
        let err = LayerStore::from_raw(&raw).unwrap_err();
        assert_eq!(err.entity(), "PUNT_FIT");
    }

    #[test]
    fn blank_point_id_fails() {
        let mut raw = minimal_raw();
        raw.proposals.features[0]
            .properties
            .insert("ID_PUNT".into(), serde_json::json!(""));
        assert!(matches!(
            LayerStore::from_raw(&raw),
            Err(LoadError::InvalidValue { ref field, .. }) if field == "ID_PUNT"
        ));
    }

    #[test]
    fn point_layer_rejects_line_geometry() {
        let mut raw = minimal_raw();
        raw.points.features[0].geometry = Some(RawGeometry::LineString(vec![vec![0.0, 0.0]]));
        assert!(matches!(
            LayerStore::from_raw(&raw),
            Err(LoadError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn belongs_to_compares_numerically() {
        let line = LineId::new(42).unwrap();
        let mut seg = LineFeature::new("1", line, LineGeometry::Empty);
        seg.line_id = Some("0042".into());
        assert!(seg.belongs_to(line));
        seg.line_id = Some("43".into());
        assert!(!seg.belongs_to(line));
        seg.line_id = None;
        assert!(!seg.belongs_to(line));
    }

    #[test]
    fn line_geometry_shape_queries() {
        let single = LineGeometry::Single(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]);
        assert_eq!(single.part_count(), 1);
        assert_eq!(single.vertex_count(), 2);
        assert!(!single.is_ring());

        let ring = LineGeometry::Single(line_string![
            (x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 0.0)
        ]);
        assert!(ring.is_ring());

        let multi = LineGeometry::Multi(MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)],
            line_string![(x: 5.0, y: 0.0), (x: 6.0, y: 0.0)],
        ]));
        assert!(multi.is_multipart());
        assert_eq!(multi.part_count(), 2);
        let (first, last) = multi.endpoints().unwrap();
        assert_eq!((first.x, last.x), (0.0, 6.0));

        assert!(LineGeometry::Empty.is_empty());
        assert!(LineGeometry::Empty.endpoints().is_none());
        assert!(LineGeometry::Empty.to_geometry().is_none());
    }

    #[test]
    fn point_validity_and_height() {
        assert!(PointGeometry::with_z(1.0, 2.0, 3.0).has_positive_z());
        assert!(!PointGeometry::with_z(1.0, 2.0, 0.0).has_positive_z());
        assert!(!PointGeometry::new(1.0, 2.0).has_positive_z());
        assert!(!PointGeometry::new(f64::NAN, 2.0).is_valid());
    }
}
