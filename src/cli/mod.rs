//! cli
//!
//! Command-line interface layer for gitsim.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Load configuration and the saved session
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. Every repository change goes through
//! [`crate::engine`]; this layer only decides where the session lives,
//! when it is saved and what gets printed.

pub mod args;
pub mod commands;

pub use args::{Cli, Command, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use crate::core::config::Config;
use crate::core::lock::SessionLock;
use crate::core::store::{FileSessionStore, Session, SessionStore};
use crate::ui::output::Verbosity;

/// Per-invocation settings shared by the command handlers.
#[derive(Debug)]
pub struct Context {
    /// Where the session is loaded from and saved to.
    pub store: FileSessionStore,
    /// Loaded configuration.
    pub config: Config,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

impl Context {
    /// Build a context from global flags.
    ///
    /// `--config` replaces the standard config lookup; `--session` wins
    /// over the configured session file.
    pub fn new(
        session: Option<PathBuf>,
        config: Option<PathBuf>,
        verbosity: Verbosity,
    ) -> Result<Self> {
        let config = match config {
            Some(path) => Config::load_from(&path)?,
            None => Config::load()?,
        };
        if let Some(path) = config.loaded_from() {
            tracing::debug!(path = %path.display(), "loaded config");
        }

        let session_path = match session {
            Some(path) => path,
            None => config.session_file()?,
        };

        Ok(Self {
            store: FileSessionStore::new(session_path),
            config,
            verbosity,
        })
    }

    /// Load the saved session, or the initial repository if none exists.
    pub fn load_session(&self) -> Result<Session> {
        Session::load_or_bootstrap(&self.store)
            .with_context(|| format!("cannot load session {}", self.store.path().display()))
    }

    /// Lock the session, then load it.
    ///
    /// Keep the returned guard alive until [`Context::save_session`] has
    /// finished so no other process updates the session in between.
    pub fn load_for_update(&self) -> Result<(SessionLock, Session)> {
        let lock = self
            .store
            .lock()
            .with_context(|| format!("cannot lock session {}", self.store.path().display()))?;
        let session = self.load_session()?;
        Ok((lock, session))
    }

    /// Save the session.
    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.store
            .save(session)
            .with_context(|| format!("cannot save session {}", self.store.path().display()))
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    // Completion needs neither config nor session.
    if let Command::Completion { shell } = cli.command {
        return commands::completion(shell);
    }

    let ctx = Context::new(cli.session, cli.config, verbosity)?;
    commands::dispatch(cli.command, &ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine;
    use tempfile::TempDir;

    fn context_in(dir: &TempDir) -> Context {
        Context {
            store: FileSessionStore::new(dir.path().join("session.json")),
            config: Config::default(),
            verbosity: Verbosity::Quiet,
        }
    }

    #[test]
    fn update_holds_lock_until_dropped() {
        let dir = TempDir::new().expect("create temp dir");
        let first = context_in(&dir);
        let second = context_in(&dir);

        let (guard, mut session) = first.load_for_update().expect("first update");
        assert!(second.load_for_update().is_err());

        session.state = engine::run(&session.state, "git branch feature").expect("branch");
        first.save_session(&session).expect("save");
        drop(guard);

        let (_guard, mut session) = second.load_for_update().expect("second update");
        session.state = engine::run(&session.state, "git branch hotfix").expect("branch");
        second.save_session(&session).expect("save");

        let saved = first.load_session().expect("load");
        assert!(saved.state.branches().contains("feature"));
        assert!(saved.state.branches().contains("hotfix"));
    }
}
