//! Configuration.
//!
//! [`GuardConfig`] is the on-disk (JSON) form of the normalizer settings. Every field has a
//! default, so an empty object `{}` is a valid configuration.

use crate::{ConfigError, NormalizeOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for `eol-guard`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuardConfig {
    /// Strip trailing spaces/tabs and terminate the last line. Off by default.
    pub trim_trailing_whitespace: bool,
}

impl GuardConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Normalizer options described by this configuration.
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            trim_trailing_whitespace: self.trim_trailing_whitespace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = GuardConfig::from_json("{}").unwrap();
        assert_eq!(config, GuardConfig::default());
        assert!(!config.normalize_options().trim_trailing_whitespace);
    }

    #[test]
    fn test_trim_flag() {
        let config = GuardConfig::from_json(r#"{ "trim_trailing_whitespace": true }"#).unwrap();
        assert!(config.normalize_options().trim_trailing_whitespace);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = GuardConfig::from_json(r#"{ "trim": true }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
