//! cqline - Automated quality checks for delimitation line submissions
//!
//! A surveyor submits a proposed municipal boundary line as a folder of
//! layers (line segments, marker points) and tables (proposal
//! classification, found-marker bookkeeping). cqline checks the
//! submission and reports every finding as a leveled entry.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Orchestrates Ingest -> Gate -> Check -> Report -> Release
//! - [`checks`] - The ordered validators
//! - [`ingest`] - Submission folder to typed layers
//! - [`reference`] - Persisted reference lines and markers
//! - [`store`] - Typed layer records and the raw layer format
//! - [`core`] - Domain types, geometry, config, paths, locking
//! - [`ui`] - User-facing output
//!
//! # Correctness Invariants
//!
//! 1. A run either completes with every check, or is gated with one message
//! 2. Findings never stop a run
//! 3. The report is built in memory and never parsed back
//! 4. Two runs never check the same line at once

pub mod checks;
pub mod cli;
pub mod core;
pub mod engine;
pub mod ingest;
pub mod reference;
pub mod store;
pub mod ui;
