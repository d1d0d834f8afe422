//! Durable key-value stores
//!
//! The engine persists two slots (tree and working location). Anything
//! that can get and set bytes by key can back it.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from storage operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Backend cannot be reached at all
    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),

    /// Read or write of a single slot failed
    #[error("I/O error on key '{key}': {message}")]
    Io { key: String, message: String },

    /// Key cannot be stored by this backend
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),
}

/// A durable key-value slot store
pub trait KeyValueStore {
    /// Reads a slot; `Ok(None)` if it was never written
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces a slot
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory store
///
/// Cloning snapshots every slot, which is how tests simulate a restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    slots: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a slot, returning its previous bytes
    pub fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        self.slots.remove(key)
    }

    /// Borrows a slot without copying
    pub fn peek(&self, key: &str) -> Option<&[u8]> {
        self.slots.get(key).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.slots.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}

/// Store keeping one `<key>.json` file per slot under a directory
///
/// Writes go to a temporary file that is renamed over the slot, so a slot
/// is always either the old or the new bytes.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Opens (creating if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root)
            .map_err(|e| StorageError::Unavailable(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    /// Directory holding the slot files
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_valid_key(key: &str) -> bool {
        !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        if !Self::is_valid_key(key) {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for DirectoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension("json.tmp");
        let io_err = |e: std::io::Error| StorageError::Io {
            key: key.to_string(),
            message: e.to_string(),
        };
        fs::write(&tmp, value).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}
