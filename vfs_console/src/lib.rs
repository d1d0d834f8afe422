//! # VFS Console (Demo)
//!
//! A thin command dispatcher over the VFS engine. It is NOT a shell and
//! NOT intended for POSIX compatibility: one command per line, no pipes,
//! and `echo` redirection is the only syntax beyond plain words.

pub mod commands;

pub use commands::{CommandHandler, TabCompletion};

use services_vfs::{
    DirectoryStore, KeyValueStore, MemoryStore, StorageError, SystemClock, VfsConfig, VfsEngine,
};
use std::path::Path;

/// Bootstrap function
///
/// Initializes an engine over `store` with the wall clock and wraps it in
/// a command handler. Initialization never fails; a store that cannot be
/// read starts from the seed layout.
pub fn bootstrap<S: KeyValueStore>(store: S, config: VfsConfig) -> CommandHandler<S> {
    CommandHandler::new(VfsEngine::init_with(store, config, Box::new(SystemClock)))
}

/// A console whose state lives only as long as the process
pub fn bootstrap_in_memory(config: VfsConfig) -> CommandHandler<MemoryStore> {
    bootstrap(MemoryStore::new(), config)
}

/// A console persisted to one file per slot under `root`
pub fn bootstrap_in_directory(
    root: &Path,
    config: VfsConfig,
) -> Result<CommandHandler<DirectoryStore>, StorageError> {
    Ok(bootstrap(DirectoryStore::open(root)?, config))
}
