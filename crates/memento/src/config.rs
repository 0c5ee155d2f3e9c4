use memento_common::IgnoreList;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Construction-time configuration of a memento.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MementoConfig {
    /// Keys excluded from every capture and from restores that use the
    /// default configuration.
    pub ignore: IgnoreList,
}

impl MementoConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add keys to the ignore list.
    pub fn with_ignore<S: Into<String>>(mut self, keys: impl IntoIterator<Item = S>) -> Self {
        for key in keys {
            self.ignore.insert(key);
        }
        self
    }

    /// Parse a configuration from JSON, e.g. `{"ignore": ["updated_at"]}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}
