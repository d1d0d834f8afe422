//! VFS persistence layer
//!
//! This module handles loading and saving the tree and the working
//! location to a key-value store. Both slots are JSON; loading adopts
//! them together or not at all.

use crate::config::VfsConfig;
use crate::storage::{KeyValueStore, StorageError};
use thiserror::Error;
use vfs_tree::{Entry, EntryError};

/// Errors that can occur during persistence operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The store failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Failed to serialize a slot
    #[error("Failed to serialize {slot}: {message}")]
    SerializationFailed { slot: String, message: String },

    /// Failed to deserialize a slot
    #[error("Failed to deserialize {slot}: {message}")]
    DeserializationFailed { slot: String, message: String },

    /// The stored tree breaks a structural invariant
    #[error("Persisted tree is invalid: {0}")]
    InvalidTree(#[from] EntryError),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Tree and working location as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedState {
    pub root: Entry,
    pub location: Vec<String>,
}

/// Serializes a tree to JSON bytes
pub fn serialize_tree(root: &Entry) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec(root).map_err(|e| PersistenceError::SerializationFailed {
        slot: "tree".to_string(),
        message: e.to_string(),
    })
}

/// Deserializes and validates a tree from JSON bytes
pub fn deserialize_tree(bytes: &[u8]) -> PersistenceResult<Entry> {
    let mut root: Entry =
        serde_json::from_slice(bytes).map_err(|e| PersistenceError::DeserializationFailed {
            slot: "tree".to_string(),
            message: e.to_string(),
        })?;
    root.validate_root()?;
    Ok(root)
}

/// Serializes a working location to JSON bytes
pub fn serialize_location(location: &[String]) -> PersistenceResult<Vec<u8>> {
    serde_json::to_vec(location).map_err(|e| PersistenceError::SerializationFailed {
        slot: "location".to_string(),
        message: e.to_string(),
    })
}

/// Deserializes a working location from JSON bytes
pub fn deserialize_location(bytes: &[u8]) -> PersistenceResult<Vec<String>> {
    serde_json::from_slice(bytes).map_err(|e| PersistenceError::DeserializationFailed {
        slot: "location".to_string(),
        message: e.to_string(),
    })
}

/// Writes both slots
///
/// The tree is written first; a failure stops before the location.
pub fn save_state<S: KeyValueStore>(
    store: &mut S,
    config: &VfsConfig,
    root: &Entry,
    location: &[String],
) -> PersistenceResult<()> {
    let tree_bytes = serialize_tree(root)?;
    let location_bytes = serialize_location(location)?;
    store.set(&config.tree_key, &tree_bytes)?;
    store.set(&config.location_key, &location_bytes)?;
    Ok(())
}

/// Reads both slots
///
/// Returns `Ok(None)` if either slot has never been written.
pub fn load_state<S: KeyValueStore>(
    store: &S,
    config: &VfsConfig,
) -> PersistenceResult<Option<PersistedState>> {
    let tree_bytes = store.get(&config.tree_key)?;
    let location_bytes = store.get(&config.location_key)?;

    let (Some(tree_bytes), Some(location_bytes)) = (tree_bytes, location_bytes) else {
        return Ok(None);
    };

    let root = deserialize_tree(&tree_bytes)?;
    let location = deserialize_location(&location_bytes)?;
    Ok(Some(PersistedState { root, location }))
}
