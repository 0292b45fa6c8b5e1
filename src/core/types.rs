//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`LineId`] - Numeric delimitation line identifier
//! - [`PointId`] - Marker point identifier (`ID_PUNT`)
//! - [`SegmentId`] - Line segment (tram) identifier
//! - [`Label`] - Human marker label (`ETIQUETA`), e.g. `F-12`
//! - [`Fingerprint`] - Hash of the submitted entities
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so validators never re-check them.
//!
//! # Examples
//!
//! ```
//! use cqline::core::types::{Label, LineId};
//!
//! let line = LineId::parse("123").unwrap();
//! assert_eq!(line.padded(), "0123");
//!
//! let label = Label::new("F-12");
//! assert_eq!(label.number(), Some(12));
//!
//! assert!(LineId::parse("12a").is_err());
//! ```

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid line id: {0}")]
    InvalidLineId(String),

    #[error("invalid point id: {0}")]
    InvalidPointId(String),
}

/// A validated delimitation line identifier.
///
/// Line identifiers are positive integers. The submission folder and the
/// reference layers key on the numeric value; reports and log filenames
/// use the zero-padded 4-digit text form.
///
/// # Example
///
/// ```
/// use cqline::core::types::LineId;
///
/// let id = LineId::parse(" 42 ").unwrap();
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// assert_eq!(id.padded(), "0042");
///
/// assert!(LineId::parse("").is_err());
/// assert!(LineId::parse("0").is_err());
/// assert!(LineId::parse("-3").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct LineId(u32);

impl LineId {
    /// Create a line id from its numeric value.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidLineId` for zero.
    pub fn new(value: u32) -> Result<Self, TypeError> {
        if value == 0 {
            return Err(TypeError::InvalidLineId(
                "line id must be a positive integer".into(),
            ));
        }
        Ok(Self(value))
    }

    /// Parse a line id from user input (surrounding whitespace ignored).
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidLineId` if the token is empty, not all
    /// digits, out of range, or zero.
    pub fn parse(token: &str) -> Result<Self, TypeError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TypeError::InvalidLineId("no line id given".into()));
        }
        if !token.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeError::InvalidLineId(format!(
                "'{token}' is not a number"
            )));
        }
        let value: u32 = token
            .parse()
            .map_err(|_| TypeError::InvalidLineId(format!("'{token}' is out of range")))?;
        Self::new(value)
    }

    /// Get the numeric value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Zero-padded 4-digit text form (`123` -> `0123`).
    pub fn padded(&self) -> String {
        format!("{:04}", self.0)
    }
}

impl TryFrom<u32> for LineId {
    type Error = TypeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LineId> for u32 {
    fn from(id: LineId) -> Self {
        id.0
    }
}

impl std::str::FromStr for LineId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a marker point (`ID_PUNT`).
///
/// Point ids are opaque, non-empty strings shared by the point layer,
/// the proposal table and the found-marker table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PointId(String);

impl PointId {
    /// Create a point id, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidPointId` if the id is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(TypeError::InvalidPointId("point id cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PointId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PointId> for String {
    fn from(id: PointId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a line segment (the `ID` field of the line layer).
///
/// Numeric ids from the source layer are kept in their text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SegmentId(String);

impl SegmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human label of a marker point (`ETIQUETA`), formatted `...-<number>`.
///
/// Labels order markers along the line: the ordering key is the first
/// run of ASCII digits found anywhere in the label.
///
/// # Example
///
/// ```
/// use cqline::core::types::Label;
///
/// assert_eq!(Label::new("F-7").number(), Some(7));
/// assert_eq!(Label::new("3T-12").number(), Some(3));
/// assert_eq!(Label::new("aux").number(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the ordering number (first run of digits).
    ///
    /// Returns `None` if the label has no digits or the run does not fit
    /// in a `u64`.
    pub fn number(&self) -> Option<u64> {
        static DIGITS: OnceLock<Option<Regex>> = OnceLock::new();
        let re = DIGITS.get_or_init(|| Regex::new(r"\d+").ok()).as_ref()?;
        re.find(&self.0).and_then(|m| m.as_str().parse().ok())
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Content hash of a submission's entities.
///
/// Computed over `(entity name, bytes)` pairs sorted by name, so two runs
/// over byte-identical submissions report the same fingerprint.
///
/// # Example
///
/// ```
/// use cqline::core::types::Fingerprint;
///
/// let a = Fingerprint::compute(&[("Punt", b"{}".as_slice()), ("P_Proposta", b"[]".as_slice())]);
/// let b = Fingerprint::compute(&[("P_Proposta", b"[]".as_slice()), ("Punt", b"{}".as_slice())]);
/// assert_eq!(a, b);
/// assert_eq!(a.as_str().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute a fingerprint from `(name, contents)` pairs.
    pub fn compute(entities: &[(&str, &[u8])]) -> Self {
        let mut sorted: Vec<_> = entities.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));

        let mut hasher = Sha256::new();
        for (name, contents) in sorted {
            hasher.update(name.as_bytes());
            hasher.update(b"\0");
            hasher.update((contents.len() as u64).to_le_bytes());
            hasher.update(contents);
        }

        Self(hex::encode(hasher.finalize()))
    }

    /// Get the fingerprint as a hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display.
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
