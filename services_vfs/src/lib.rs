//! # VFS Service
//!
//! This service owns a virtual filesystem instance: the tree, the working
//! location, and the durable store they are persisted to.
//!
//! ## Operations
//!
//! - `list(path)`: List directory contents
//! - `change_directory(path)`: Move the working location
//! - `read(name)` / `write(name, content, mode)`: Whole-content file access
//! - `create(name, content)` / `mkdir(name)`: Create entries in the working directory
//! - `delete(name)`: Remove an entry (and its subtree)
//! - `stat(path)`: Inspect any entry
//! - `complete(token)`: Completion candidates for a partial path
//! - `reset()`: Restore the seed layout
//!
//! ## Persistence
//!
//! Every mutation re-persists the whole tree and working location to a
//! [`KeyValueStore`]. Storage failures never fail an operation; they are
//! logged and reported through [`VfsEngine::last_persist_error`].

pub mod clock;
pub mod config;
pub mod error;
pub mod failing_store;
pub mod operations;
pub mod persistence;
pub mod seed;
pub mod service;
pub mod storage;

pub use clock::{Clock, LogicalClock, SystemClock};
pub use config::{ConfigError, VfsConfig};
pub use error::VfsError;
pub use failing_store::{FailingStore, FailurePolicy};
pub use operations::{VfsOperations, WriteMode};
pub use persistence::{PersistedState, PersistenceError};
pub use service::{InitOutcome, VfsEngine};
pub use storage::{DirectoryStore, KeyValueStore, MemoryStore, StorageError};
