//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Validation
//!
//! Config values are validated after parsing so a bad value is reported
//! with the file it came from rather than surfacing later as odd behavior.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// session_file = "/home/me/sandbox/session.json"
/// history_limit = 100
/// show_status = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Where the session JSON lives
    pub session_file: Option<PathBuf>,

    /// How many distinct commands the history keeps
    pub history_limit: Option<usize>,

    /// Print the status view after each mutating command
    pub show_status: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == Some(0) {
            return Err(ConfigError::InvalidValue(
                "history_limit must be greater than zero".to_string(),
            ));
        }

        if let Some(path) = &self.session_file {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "session_file cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config: GlobalConfig = toml::from_str(
            r#"
            session_file = "/tmp/s.json"
            history_limit = 10
            show_status = false
            "#,
        )
        .unwrap();
        assert_eq!(config.session_file, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(config.history_limit, Some(10));
        assert_eq!(config.show_status, Some(false));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_config_is_default() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn unknown_field_rejected() {
        let result: Result<GlobalConfig, _> = toml::from_str("colour = true");
        assert!(result.is_err());
    }

    #[test]
    fn zero_history_limit_invalid() {
        let config = GlobalConfig {
            history_limit: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue(_))
        ));
    }
}
