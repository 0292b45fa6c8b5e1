//! reference
//!
//! Read-only access to previously persisted lines and markers.
//!
//! # Architecture
//!
//! The authoritative database keeps two layers per authority:
//!
//! - `tram_linia_mem` - line segments already registered
//! - `fita_mem` - markers already registered
//!
//! Both carry an `id_linia` field. The pipeline reads them once per run
//! through the [`ReferenceStore`] trait and never writes to them.
//!
//! Implementations:
//! - [`JsonReferenceStore`] - reads `<dir>/tram_linia_mem.json` and
//!   `<dir>/fita_mem.json` in the submission layer format
//! - [`MemoryReferenceStore`] - serves fixed data (tests, embedding)
//!
//! # Example
//!
//! ```
//! use cqline::reference::{MemoryReferenceStore, ReferenceData, ReferenceStore};
//!
//! let store = MemoryReferenceStore::new(ReferenceData::default());
//! let data = store.load().unwrap();
//! assert!(data.lines.is_empty());
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::entity_file;
use crate::core::types::LineId;
use crate::store::{
    entity, line_geometry, point_geometry, FieldRef, LineGeometry, LoadError, PointGeometry,
    RawLayer,
};

/// Errors from reading reference data.
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("reference data unavailable: {0}")]
    Load(#[from] LoadError),

    #[error("reference directory '{0}' does not exist")]
    MissingDir(PathBuf),
}

/// A persisted line segment.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub line_id: Option<i64>,
    pub geometry: LineGeometry,
}

/// A persisted marker.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMarker {
    pub line_id: Option<i64>,
    pub position: Option<PointGeometry>,
}

/// Reference layers for one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceData {
    pub lines: Vec<ReferenceLine>,
    pub markers: Vec<ReferenceMarker>,
}

impl ReferenceData {
    pub fn has_line(&self, line: LineId) -> bool {
        self.lines.iter().any(|l| l.line_id == Some(i64::from(line.get())))
    }

    pub fn has_markers(&self, line: LineId) -> bool {
        self.markers
            .iter()
            .any(|m| m.line_id == Some(i64::from(line.get())))
    }
}

/// Source of reference data.
pub trait ReferenceStore {
    /// Read both reference layers.
    fn load(&self) -> Result<ReferenceData, ReferenceError>;
}

/// Reference layers stored as JSON documents in a directory.
#[derive(Debug, Clone)]
pub struct JsonReferenceStore {
    dir: PathBuf,
}

impl JsonReferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

const LINE_ID_FIELD: &str = "id_linia";

impl ReferenceStore for JsonReferenceStore {
    fn load(&self) -> Result<ReferenceData, ReferenceError> {
        if !self.dir.is_dir() {
            return Err(ReferenceError::MissingDir(self.dir.clone()));
        }

        let e = entity::REFERENCE_LINES;
        let raw = RawLayer::read(e, &self.dir.join(entity_file(e)))?;
        raw.require_fields(e, &[LINE_ID_FIELD])?;
        let lines = raw
            .features
            .iter()
            .enumerate()
            .map(|(index, f)| {
                Ok(ReferenceLine {
                    line_id: f.integer(FieldRef {
                        entity: e,
                        index,
                        field: LINE_ID_FIELD,
                    })?,
                    geometry: line_geometry(e, index, f.geometry.as_ref())?,
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        let e = entity::REFERENCE_MARKERS;
        let raw = RawLayer::read(e, &self.dir.join(entity_file(e)))?;
        raw.require_fields(e, &[LINE_ID_FIELD])?;
        let markers = raw
            .features
            .iter()
            .enumerate()
            .map(|(index, f)| {
                Ok(ReferenceMarker {
                    line_id: f.integer(FieldRef {
                        entity: e,
                        index,
                        field: LINE_ID_FIELD,
                    })?,
                    position: point_geometry(e, index, f.geometry.as_ref())?,
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        tracing::debug!(
            dir = %self.dir.display(),
            lines = lines.len(),
            markers = markers.len(),
            "loaded reference data"
        );
        Ok(ReferenceData { lines, markers })
    }
}

/// Reference data held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryReferenceStore {
    data: ReferenceData,
}

impl MemoryReferenceStore {
    pub fn new(data: ReferenceData) -> Self {
        Self { data }
    }
}

impl ReferenceStore for MemoryReferenceStore {
    fn load(&self) -> Result<ReferenceData, ReferenceError> {
        Ok(self.data.clone())
    }
}
