//! core::ops
//!
//! Run isolation primitives.
//!
//! # Modules
//!
//! - [`lock`] - Exclusive per-line lock
//!
//! # Architecture
//!
//! Every check run:
//! 1. Acquires the exclusive line lock
//! 2. Works in its own scratch workspace
//! 3. Releases the lock once the report is final

pub mod lock;

pub use lock::{LineLock, LockError};
