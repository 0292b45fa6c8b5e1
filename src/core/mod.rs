//! core
//!
//! Core domain types, geometry helpers, configuration and run isolation.
//!
//! # Modules
//!
//! - [`types`] - Strong types: LineId, PointId, Label, Fingerprint
//! - [`geom`] - Decimetre rounding and geometric predicates
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for submissions and workspaces
//! - [`ops`] - Per-line locking
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - All checks are deterministic

pub mod config;
pub mod geom;
pub mod ops;
pub mod paths;
pub mod types;
