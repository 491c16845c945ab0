//! core::paths
//!
//! Centralized path routing for gitsim storage locations.
//!
//! # Storage Layout
//!
//! All gitsim data lives under one base directory (default `~/.gitsim/`):
//! - `config.toml` - User configuration
//! - `session.json` - Persisted repository state and command history
//! - `session.lock` - Exclusive lock taken while saving
//!
//! # Example
//!
//! ```
//! use gitsim::core::paths::GitsimPaths;
//! use std::path::PathBuf;
//!
//! let paths = GitsimPaths::new(PathBuf::from("/home/me/.gitsim"));
//!
//! assert_eq!(
//!     paths.session_path(),
//!     PathBuf::from("/home/me/.gitsim/session.json")
//! );
//! ```

use std::path::{Path, PathBuf};

/// Name of the base directory under the home directory.
const BASE_DIR_NAME: &str = ".gitsim";

/// Centralized path routing for gitsim storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitsimPaths {
    base: PathBuf,
}

impl GitsimPaths {
    /// Paths rooted at an explicit base directory.
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Paths rooted at `~/.gitsim`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn from_home() -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home.join(BASE_DIR_NAME)))
    }

    /// `<base>/config.toml`
    pub fn config_path(&self) -> PathBuf {
        self.base.join("config.toml")
    }

    /// `<base>/session.json`
    pub fn session_path(&self) -> PathBuf {
        self.base.join("session.json")
    }

    /// Lock file guarding writes of `session`.
    pub fn lock_path_for(session: &Path) -> PathBuf {
        session.with_extension("lock")
    }
}
