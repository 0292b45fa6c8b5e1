//! store::raw
//!
//! On-disk layer format and typed field access.
//!
//! # Format
//!
//! Every entity of a submission (layer or table) is one JSON document:
//!
//! ```json
//! {
//!   "fields": ["ID_PUNT", "ETIQUETA", "FOTOS", "CONTACTE", "geometry"],
//!   "features": [
//!     {
//!       "properties": {"ID_PUNT": "P-1", "ETIQUETA": "F-1"},
//!       "geometry": {"type": "Point", "coordinates": [401234.5, 4612345.6, 312.0]}
//!     }
//!   ]
//! }
//! ```
//!
//! `fields` is the declared field set of the entity (the shapefile/DBF
//! header in the source data). Tables have no `geometry`. A `null`
//! geometry is an empty geometry.
//!
//! Field values are read through [`RawFeature`] accessors, which accept
//! the encodings found in real submissions: flags as booleans, `0/1`, or
//! `"0"/"1"`; integers as numbers or digit strings.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::LoadError;

/// A single entity as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLayer {
    /// Declared field names (order as in the source).
    #[serde(default)]
    pub fields: Vec<String>,
    /// Features or table rows.
    #[serde(default)]
    pub features: Vec<RawFeature>,
}

impl RawLayer {
    /// Parse an entity document.
    pub fn from_json(entity: &str, text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| LoadError::Parse {
            entity: entity.to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse an entity document from disk.
    pub fn read(entity: &str, path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::Read {
            entity: entity.to_string(),
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json(entity, &text)
    }

    /// Check whether the entity declares a field.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }

    /// Require a set of declared fields.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::MissingField` naming the first absent field.
    pub fn require_fields(&self, entity: &str, fields: &[&str]) -> Result<(), LoadError> {
        match fields.iter().find(|f| !self.has_field(f)) {
            Some(missing) => Err(LoadError::MissingField {
                entity: entity.to_string(),
                field: (*missing).to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// One feature (or table row).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
}

/// GeoJSON-style geometry payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum RawGeometry {
    Point(Vec<f64>),
    LineString(Vec<Vec<f64>>),
    MultiLineString(Vec<Vec<Vec<f64>>>),
}

/// Location of a field value, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct FieldRef<'a> {
    pub entity: &'a str,
    pub index: usize,
    pub field: &'a str,
}

impl FieldRef<'_> {
    fn invalid(&self, message: impl Into<String>) -> LoadError {
        LoadError::InvalidValue {
            entity: self.entity.to_string(),
            index: self.index,
            field: self.field.to_string(),
            message: message.into(),
        }
    }
}

impl RawFeature {
    fn value(&self, field: &str) -> Option<&Value> {
        self.properties.get(field).filter(|v| !v.is_null())
    }

    /// Text value of a field. Numbers are rendered in their JSON form;
    /// blank strings read as absent.
    pub fn text(&self, field: &str) -> Option<String> {
        match self.value(field)? {
            Value::String(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
            _ => None,
        }
    }

    /// Boolean flag. Absent or null reads as `false`.
    pub fn flag(&self, at: FieldRef<'_>) -> Result<bool, LoadError> {
        match self.value(at.field) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(v) if v == 0.0 => Ok(false),
                Some(v) if v == 1.0 => Ok(true),
                _ => Err(at.invalid(format!("expected 0 or 1, got {n}"))),
            },
            Some(Value::String(s)) => match s.trim() {
                "" | "0" | "false" | "False" => Ok(false),
                "1" | "true" | "True" => Ok(true),
                other => Err(at.invalid(format!("expected 0 or 1, got '{other}'"))),
            },
            Some(other) => Err(at.invalid(format!("expected a flag, got {other}"))),
        }
    }

    /// Nullable integer.
    pub fn integer(&self, at: FieldRef<'_>) -> Result<Option<i64>, LoadError> {
        match self.value(at.field) {
            None => Ok(None),
            Some(Value::Number(n)) => {
                if let Some(v) = n.as_i64() {
                    return Ok(Some(v));
                }
                match n.as_f64() {
                    Some(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(Some(v as i64)),
                    _ => Err(at.invalid(format!("expected an integer, got {n}"))),
                }
            }
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| at.invalid(format!("expected an integer, got '{s}'"))),
            Some(other) => Err(at.invalid(format!("expected an integer, got {other}"))),
        }
    }
}
