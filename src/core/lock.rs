//! core::lock
//!
//! Exclusive lock around a session update.
//!
//! # Architecture
//!
//! Every mutating `gitsim` invocation loads the session, applies one
//! command and saves. The lock is held across that whole cycle so a second
//! process cannot load the same session and overwrite the first one's
//! result. It uses OS-level file locking via `fs2`, so it works across
//! processes and is released when the guard drops.
//!
//! # Invariants
//!
//! - Lock acquisition is non-blocking (fails fast if locked)
//! - Lock is released on drop

use std::fs::{self, File, OpenOptions};
use std::path::Path;

use fs2::FileExt;
use thiserror::Error;

/// Errors from locking operations.
#[derive(Debug, Error)]
pub enum LockError {
    /// Another process already holds the lock.
    #[error("session is locked by another gitsim process")]
    AlreadyLocked,

    /// Failed to create lock file or directory.
    #[error("failed to create lock: {0}")]
    CreateFailed(String),

    /// Failed to acquire the OS lock.
    #[error("failed to acquire lock: {0}")]
    AcquireFailed(String),
}

/// An exclusive lock on a session file.
#[derive(Debug)]
pub struct SessionLock {
    file: Option<File>,
}

impl SessionLock {
    /// Acquire the lock file at `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// - [`LockError::AlreadyLocked`] if another process holds the lock
    /// - [`LockError::CreateFailed`] if the lock file cannot be created
    /// - [`LockError::AcquireFailed`] if the OS lock cannot be acquired
    pub fn acquire(path: &Path) -> Result<Self, LockError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LockError::CreateFailed(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(|e| {
                LockError::CreateFailed(format!("cannot open {}: {}", path.display(), e))
            })?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(Self { file: Some(file) }),
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => Err(LockError::AlreadyLocked),
            Err(e) => Err(LockError::AcquireFailed(e.to_string())),
        }
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        // Best-effort release on drop
        if let Some(file) = self.file.take() {
            let _ = file.unlock();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn acquire_creates_parent_dirs() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("nested/session.lock");

        let _lock = SessionLock::acquire(&path).expect("acquire lock");
        assert!(path.exists());
    }

    #[test]
    fn second_acquire_fails_while_held() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("session.lock");

        let _first = SessionLock::acquire(&path).expect("first acquire");
        let second = SessionLock::acquire(&path);
        assert!(matches!(second, Err(LockError::AlreadyLocked)));
    }

    #[test]
    fn released_on_drop() {
        let temp = TempDir::new().expect("create temp dir");
        let path = temp.path().join("session.lock");

        {
            let _lock = SessionLock::acquire(&path).expect("acquire");
        }
        assert!(SessionLock::acquire(&path).is_ok());
    }
}
