//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All human-facing output goes through this module so that the quiet and
//! debug flags are honored consistently. Diagnostics use `tracing` instead.

pub mod output;
