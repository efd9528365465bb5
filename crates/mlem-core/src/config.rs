//! Tunables for the arrangement editor.

use crate::collection::ReturnPolicy;
use crate::gesture::DEFAULT_MINIMUM_DISTANCE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default maximum number of widgets in an interaction bar.
pub const DEFAULT_BAR_CAPACITY: usize = 7;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(String),
}

/// Editor configuration. Missing fields fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrangementConfig {
    /// Where a widget dropped back into its own collection lands.
    pub return_policy: ReturnPolicy,
    /// Pointer travel needed before a drag starts.
    pub minimum_drag_distance: f64,
    /// Maximum number of widgets in the bar.
    pub bar_capacity: usize,
}

impl Default for ArrangementConfig {
    fn default() -> Self {
        Self {
            return_policy: ReturnPolicy::default(),
            minimum_drag_distance: DEFAULT_MINIMUM_DISTANCE,
            bar_capacity: DEFAULT_BAR_CAPACITY,
        }
    }
}

impl ArrangementConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load the config file, or the defaults if it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = ArrangementConfig::from_json(r#"{ "return_policy": "append_to_tail" }"#).unwrap();

        assert_eq!(config.return_policy, ReturnPolicy::AppendToTail);
        assert_eq!(config.bar_capacity, DEFAULT_BAR_CAPACITY);
        assert!((config.minimum_drag_distance - DEFAULT_MINIMUM_DISTANCE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_config() {
        let result = ArrangementConfig::from_json(r#"{ "bar_capacity": "seven" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let config = ArrangementConfig::load_or_default(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, ArrangementConfig::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "bar_capacity": 5 }"#).unwrap();

        let config = ArrangementConfig::load_or_default(&path).unwrap();
        assert_eq!(config.bar_capacity, 5);
    }
}
