//! core::store
//!
//! Session persistence.
//!
//! # Architecture
//!
//! A [`Session`] is everything worth keeping between runs: the repository
//! state and the command history. The core knows only the [`SessionStore`]
//! trait ("load a session or none", "save a session"). Saving is an explicit
//! call the caller makes after a transition; the interpreter never saves.
//!
//! [`FileSessionStore`] keeps the session as pretty-printed JSON. Writes are
//! atomic (temp file, then rename). A caller that loads, applies a command
//! and saves holds the store's [`SessionLock`] for that whole cycle, so two
//! processes cannot both start from the same session and lose one update.
//! A loaded
//! session is verified before it is returned, so a hand-edited or truncated
//! file is reported instead of silently producing a broken state.
//!
//! # Example
//!
//! ```no_run
//! use gitsim::core::store::{FileSessionStore, Session, SessionStore};
//! use std::path::PathBuf;
//!
//! let store = FileSessionStore::new(PathBuf::from("/tmp/gitsim/session.json"));
//! let _lock = store.lock().unwrap();
//! let session = Session::load_or_bootstrap(&store).unwrap();
//! store.save(&session).unwrap();
//! ```

use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::history::CommandHistory;
use super::lock::{LockError, SessionLock};
use super::paths::GitsimPaths;
use super::state::RepoState;
use super::verify::{verify, VerifyError};

/// Current on-disk session format version.
pub const SESSION_VERSION: u32 = 1;

/// Errors from session storage.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read session file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write session file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse session file '{path}': {message}")]
    Parse { path: PathBuf, message: String },

    #[error("failed to serialize session: {0}")]
    Serialize(String),

    #[error("unsupported session version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("session violates repository invariants: {0}")]
    Corrupt(#[from] VerifyError),

    #[error(transparent)]
    Lock(#[from] LockError),
}

/// Persisted repository state plus command history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Format version
    pub version: u32,
    /// Repository state
    pub state: RepoState,
    /// Submitted commands, most recent first
    #[serde(default)]
    pub history: CommandHistory,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RepoState::bootstrap(), CommandHistory::default())
    }
}

impl Session {
    /// Create a session at the current format version.
    pub fn new(state: RepoState, history: CommandHistory) -> Self {
        Self {
            version: SESSION_VERSION,
            state,
            history,
        }
    }

    /// Load the stored session, falling back to the bootstrap state.
    pub fn load_or_bootstrap(store: &dyn SessionStore) -> Result<Self, StoreError> {
        Ok(store.load()?.unwrap_or_default())
    }

    /// Check the version and repository invariants of a loaded session.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.version != SESSION_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: self.version,
                expected: SESSION_VERSION,
            });
        }
        verify(&self.state)?;
        Ok(())
    }
}

/// Storage backend for sessions.
pub trait SessionStore {
    /// Load the stored session, `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<Session>, StoreError>;

    /// Persist a session, replacing whatever was stored.
    fn save(&self, session: &Session) -> Result<(), StoreError>;
}

/// JSON file session store.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by the file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the path to the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the exclusive lock for this session.
    ///
    /// Hold the guard from before `load` until after `save`. Fails with
    /// [`LockError::AlreadyLocked`] while another holder exists.
    pub fn lock(&self) -> Result<SessionLock, StoreError> {
        Ok(SessionLock::acquire(&GitsimPaths::lock_path_for(&self.path))?)
    }

    fn write_atomic(&self, contents: &str) -> Result<(), StoreError> {
        let write_err = |path: &Path, source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_err(parent, e))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| write_err(&temp_path, e))?;
            file.write_all(contents.as_bytes())
                .map_err(|e| write_err(&temp_path, e))?;
            file.sync_all().map_err(|e| write_err(&temp_path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| write_err(&self.path, e))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| StoreError::Read {
            path: self.path.clone(),
            source: e,
        })?;

        let session: Session =
            serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        session.validate()?;

        tracing::debug!(path = %self.path.display(), commits = session.state.commits().len(), "loaded session");
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        self.write_atomic(&contents)?;

        tracing::debug!(path = %self.path.display(), "saved session");
        Ok(())
    }
}

/// In-memory session store.
///
/// Useful for embedding the simulator without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: RefCell<Option<Session>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions held (0 or 1).
    pub fn is_empty(&self) -> bool {
        self.slot.borrow().is_none()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, StoreError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, session: &Session) -> Result<(), StoreError> {
        *self.slot.borrow_mut() = Some(session.clone());
        Ok(())
    }
}
