//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$GITSIM_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/gitsim/config.toml`
//! 3. `~/.gitsim/config.toml` (canonical write location)
//!
//! # Example
//!
//! ```no_run
//! use gitsim::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("History limit: {}", config.history_limit());
//! println!("Show status: {}", config.show_status());
//! ```

pub mod schema;

pub use schema::GlobalConfig;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::history::DEFAULT_HISTORY_LIMIT;
use super::paths::GitsimPaths;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GITSIM_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded configuration.
///
/// Accessors apply defaults for anything left unset.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Values read from the config file
    pub global: GlobalConfig,
    /// Path the config was loaded from, if any
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// holds invalid values. A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let global: GlobalConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        global.validate()?;

        Ok(Self {
            global,
            loaded_from: Some(path.to_path_buf()),
        })
    }

    fn find_config_file() -> Option<PathBuf> {
        // 1. Check $GITSIM_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/gitsim/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("gitsim/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.gitsim/config.toml
        GitsimPaths::from_home()
            .map(|paths| paths.config_path())
            .filter(|path| path.exists())
    }

    /// Write a config file atomically.
    ///
    /// Creates parent directories if needed.
    pub fn write(path: &Path, config: &GlobalConfig) -> Result<(), ConfigError> {
        config.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Session file location.
    ///
    /// Defaults to `~/.gitsim/session.json`.
    pub fn session_file(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.global.session_file {
            return Ok(path.clone());
        }
        GitsimPaths::from_home()
            .map(|paths| paths.session_path())
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Number of commands the history keeps.
    ///
    /// Defaults to 50.
    pub fn history_limit(&self) -> usize {
        self.global.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Whether to print status after mutating commands.
    ///
    /// Defaults to `true`.
    pub fn show_status(&self) -> bool {
        self.global.show_status.unwrap_or(true)
    }

    /// Path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.loaded_from.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.history_limit(), DEFAULT_HISTORY_LIMIT);
        assert!(config.show_status());
        assert!(config.loaded_from().is_none());
    }

    #[test]
    fn load_from_file_applies_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "history_limit = 5\nshow_status = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.history_limit(), 5);
        assert!(!config.show_status());
        assert_eq!(config.loaded_from(), Some(path.as_path()));
    }

    #[test]
    fn explicit_session_file_wins() {
        let config = Config {
            global: GlobalConfig {
                session_file: Some(PathBuf::from("/tmp/x.json")),
                ..Default::default()
            },
            loaded_from: None,
        };
        assert_eq!(config.session_file().unwrap(), PathBuf::from("/tmp/x.json"));
    }

    #[test]
    fn parse_error_names_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "history_limit = \"many\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn invalid_value_rejected_on_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "history_limit = 0").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn write_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/config.toml");
        let global = GlobalConfig {
            history_limit: Some(7),
            ..Default::default()
        };

        Config::write(&path, &global).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.global, global);
    }
}
