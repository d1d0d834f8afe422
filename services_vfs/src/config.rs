//! Engine configuration
//!
//! All fields have defaults, so a partial JSON document is a valid config.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vfs_tree::PathResolver;

/// Errors that can occur while loading a config
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A storage key is empty
    #[error("Storage key for '{0}' must not be empty")]
    EmptyKey(&'static str),

    /// A home segment is not a valid entry name
    #[error("Invalid home path segment: '{0}'")]
    InvalidHome(String),
}

/// VFS engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VfsConfig {
    /// Durable slot holding the serialized tree
    pub tree_key: String,
    /// Durable slot holding the working location
    pub location_key: String,
    /// Working location after seeding or reset
    pub home: Vec<String>,
    /// Number of log entries the engine keeps
    pub log_capacity: usize,
}

impl VfsConfig {
    pub const DEFAULT_TREE_KEY: &'static str = "fileSystemTree";
    pub const DEFAULT_LOCATION_KEY: &'static str = "workingLocation";

    /// Parses and validates a JSON config
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: VfsConfig =
            serde_json::from_slice(bytes).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks keys are non-empty and home segments are valid names
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tree_key.is_empty() {
            return Err(ConfigError::EmptyKey("tree"));
        }
        if self.location_key.is_empty() {
            return Err(ConfigError::EmptyKey("location"));
        }
        if let Some(bad) = self.home.iter().find(|s| !PathResolver::is_valid_name(s)) {
            return Err(ConfigError::InvalidHome(bad.clone()));
        }
        Ok(())
    }

    /// The home location as a display path
    pub fn home_path(&self) -> String {
        PathResolver::display(&self.home)
    }
}

impl Default for VfsConfig {
    fn default() -> Self {
        Self {
            tree_key: Self::DEFAULT_TREE_KEY.to_string(),
            location_key: Self::DEFAULT_LOCATION_KEY.to_string(),
            home: vec!["home".to_string(), "user".to_string()],
            log_capacity: services_logger::Logger::DEFAULT_CAPACITY,
        }
    }
}
