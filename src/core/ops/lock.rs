//! core::ops::lock
//!
//! Exclusive per-line lock for check runs.
//!
//! # Architecture
//!
//! Two runs against the same line would share its upload folder and race
//! on the cleanup of its scratch workspaces. The line lock serializes them:
//! a run holds it from workspace preparation until its report is final.
//! Runs for different lines never contend.
//!
//! # Storage
//!
//! - `<work_dir>/locks/<line>.lock` - Lock file with OS-level exclusive lock
//!
//! # Invariants
//!
//! - Lock must be held for the entire run
//! - Lock is automatically released on drop (RAII pattern)
//! - Lock acquisition is non-blocking (fails fast if locked)
//!
//! # Example
//!
//! ```no_run
//! use cqline::core::ops::lock::LineLock;
//! use cqline::core::paths::WorkPaths;
//! use cqline::core::types::LineId;
//! use std::path::PathBuf;
//!
//! let paths = WorkPaths::new(PathBuf::from("/srv/work"));
//! let lock = LineLock::acquire(&paths, LineId::new(42).unwrap())?;
//!
//! // Run checks while holding lock
//! // ...
//!
//! // Lock automatically released when dropped
//! drop(lock);
//! # Ok::<(), cqline::core::ops::lock::LockError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::core::paths::WorkPaths;
use crate::core::types::LineId;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another run already holds the lock.
    #[error("line {0} is being checked by another run")]
    AlreadyLocked(LineId),

    /// Failed to create lock file or directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),

    /// Failed to release the lock.
    #[error("failed to release lock: {0}")]
    ReleaseFailed(String),
}

/// An exclusive lock on one line.
///
/// The lock is automatically released when this guard is dropped.
#[derive(Debug)]
pub struct LineLock {
    path: PathBuf,
    /// Open handle with the lock held; `None` once released.
    file: Option<File>,
}

impl LineLock {
    /// Attempt to acquire the lock for a line.
    ///
    /// Uses OS-level file locking via `fs2`, which works across processes.
    /// Non-blocking: if another run holds the lock, this returns
    /// `LockError::AlreadyLocked` immediately.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another run holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(paths: &WorkPaths, line: LineId) -> Result<Self, LockError> {
        let locks_dir = paths.locks_dir();
        fs::create_dir_all(&locks_dir).map_err(|e| {
            LockError::CreateFailed(format!("cannot create {}: {}", locks_dir.display(), e))
        })?;

        let path = paths.lock_path(line);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self {
                path,
                file: Some(file),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                Err(LockError::AlreadyLocked(line))
            }
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }

    /// Check if the lock is currently held.
    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }

    /// Get the path to the lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Release the lock explicitly.
    ///
    /// Called automatically on drop. Releasing twice is a no-op.
    pub fn release(&mut self) -> Result<(), LockError> {
        if let Some(file) = self.file.take() {
            file.unlock()
                .map_err(|e| LockError::ReleaseFailed(e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for LineLock {
    fn drop(&mut self) {
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, WorkPaths) {
        let temp = TempDir::new().expect("create temp dir");
        let paths = WorkPaths::new(temp.path().to_path_buf());
        (temp, paths)
    }

    fn line(n: u32) -> LineId {
        LineId::new(n).unwrap()
    }

    #[test]
    fn lock_acquire_succeeds() {
        let (_temp, paths) = setup();

        let lock = LineLock::acquire(&paths, line(1)).expect("acquire lock");
        assert!(lock.is_held());
        assert!(lock.path().exists());
        assert_eq!(lock.path(), paths.lock_path(line(1)));
    }

    #[test]
    fn lock_prevents_second_acquire() {
        let (_temp, paths) = setup();

        let _lock1 = LineLock::acquire(&paths, line(1)).expect("first acquire");
        let result = LineLock::acquire(&paths, line(1));
        assert!(matches!(result, Err(LockError::AlreadyLocked(l)) if l == line(1)));
    }

    #[test]
    fn different_lines_do_not_contend() {
        let (_temp, paths) = setup();

        let _a = LineLock::acquire(&paths, line(1)).expect("line 1");
        let b = LineLock::acquire(&paths, line(2)).expect("line 2");
        assert!(b.is_held());
    }

    #[test]
    fn lock_released_on_drop() {
        let (_temp, paths) = setup();

        {
            let lock = LineLock::acquire(&paths, line(3)).expect("first acquire");
            assert!(lock.is_held());
        }

        let lock2 = LineLock::acquire(&paths, line(3)).expect("second acquire");
        assert!(lock2.is_held());
    }

    #[test]
    fn multiple_release_calls_are_safe() {
        let (_temp, paths) = setup();

        let mut lock = LineLock::acquire(&paths, line(4)).expect("acquire");
        lock.release().expect("first release");
        lock.release().expect("second release should be ok");
        assert!(!lock.is_held());

        let again = LineLock::acquire(&paths, line(4)).expect("reacquire");
        assert!(again.is_held());
    }

    #[test]
    fn already_locked_message_names_line() {
        let err = LockError::AlreadyLocked(line(42));
        assert_eq!(err.to_string(), "line 42 is being checked by another run");
    }
}
