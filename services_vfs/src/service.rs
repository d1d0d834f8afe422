//! VFS engine implementation
//!
//! This module provides the engine that owns a tree, its working location
//! and the store they persist to.

use crate::clock::{Clock, SystemClock};
use crate::config::VfsConfig;
use crate::error::VfsError;
use crate::operations::{VfsOperations, WriteMode};
use crate::persistence::{self, PersistedState, PersistenceError};
use crate::seed::seed_tree;
use crate::storage::KeyValueStore;
use services_logger::{LogEntry, LogLevel, Logger};
use vfs_tree::{split_token, Completion, Entry, PathResolver};

const LOG_SOURCE: &str = "vfs";

/// How the engine obtained its initial state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// Both slots were read and adopted
    Loaded,
    /// The seed layout was installed instead
    Seeded {
        /// Why persisted state was not used
        reason: String,
    },
}

/// The VFS engine
///
/// One instance owns one namespace. Callers serialize access; there is no
/// internal locking.
pub struct VfsEngine<S: KeyValueStore> {
    root: Entry,
    location: Vec<String>,
    store: S,
    config: VfsConfig,
    clock: Box<dyn Clock>,
    logger: Logger,
    last_persist_error: Option<VfsError>,
    init_outcome: InitOutcome,
}

impl<S: KeyValueStore> VfsEngine<S> {
    /// Initializes an engine with the default config and wall clock
    pub fn init(store: S) -> Self {
        Self::init_with(store, VfsConfig::default(), Box::new(SystemClock))
    }

    /// Initializes an engine from `store`
    ///
    /// Adopts the persisted tree and working location if both load;
    /// otherwise installs the seed layout. The seed is persisted right away
    /// unless the store itself could not be read. Never fails.
    pub fn init_with(store: S, config: VfsConfig, clock: Box<dyn Clock>) -> Self {
        let logger = Logger::new(config.log_capacity);
        let mut engine = Self {
            root: Entry::root(0),
            location: Vec::new(),
            store,
            config,
            clock,
            logger,
            last_persist_error: None,
            init_outcome: InitOutcome::Loaded,
        };

        match persistence::load_state(&engine.store, &engine.config) {
            Ok(Some(PersistedState { root, location })) => {
                engine.root = root;
                engine.location = location;
                engine.record(
                    LogEntry::new(LogLevel::Info, "loaded persisted state")
                        .with_field("location", PathResolver::display(&engine.location)),
                );
            }
            Ok(None) => {
                engine.seed("no persisted state".to_string());
                engine.record(LogEntry::new(LogLevel::Info, "seeded default layout"));
                engine.persist();
            }
            Err(PersistenceError::Storage(e)) => {
                // The slots may still hold good state; leave them for the next mutation.
                engine.record(
                    LogEntry::new(LogLevel::Warn, "store unreadable, seeding defaults")
                        .with_field("error", &e),
                );
                engine.seed(e.to_string());
            }
            Err(e) => {
                engine.record(
                    LogEntry::new(LogLevel::Warn, "persisted state unusable, seeding defaults")
                        .with_field("error", &e),
                );
                engine.seed(e.to_string());
                engine.persist();
            }
        }

        engine
    }

    fn seed(&mut self, reason: String) {
        let now = self.clock.now();
        self.root = seed_tree(now);
        self.location = self.config.home.clone();
        self.init_outcome = InitOutcome::Seeded { reason };
    }

    fn record(&mut self, entry: LogEntry) {
        self.logger.log(entry.with_source(LOG_SOURCE));
    }

    /// Writes both slots; failures are logged, never returned
    fn persist(&mut self) {
        match persistence::save_state(&mut self.store, &self.config, &self.root, &self.location) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                let err = VfsError::StorageUnavailable(e.to_string());
                self.record(
                    LogEntry::new(LogLevel::Warn, "persist failed, continuing in memory")
                        .with_field("tree_key", &self.config.tree_key)
                        .with_field("location_key", &self.config.location_key)
                        .with_field("error", &err),
                );
                self.last_persist_error = Some(err);
            }
        }
    }

    fn effective_location(&self) -> Vec<String> {
        PathResolver::effective_location(&self.root, &self.location)
    }

    fn working_dir(&self) -> &Entry {
        PathResolver::lookup(&self.root, &self.location).unwrap_or(&self.root)
    }

    fn working_dir_mut(&mut self) -> Result<&mut Entry, VfsError> {
        let location = self.effective_location();
        PathResolver::lookup_mut(&mut self.root, &location)
            .ok_or_else(|| VfsError::NotFound(PathResolver::display(&location)))
    }

    fn check_name(name: &str) -> Result<(), VfsError> {
        if PathResolver::is_valid_name(name) {
            Ok(())
        } else {
            Err(VfsError::InvalidName(name.to_string()))
        }
    }

    /// The whole tree
    pub fn tree(&self) -> &Entry {
        &self.root
    }

    /// The working location as stored
    pub fn working_location(&self) -> &[String] {
        &self.location
    }

    pub fn config(&self) -> &VfsConfig {
        &self.config
    }

    /// How this engine obtained its state
    pub fn init_outcome(&self) -> &InitOutcome {
        &self.init_outcome
    }

    /// Error of the most recent persist, `None` if it succeeded
    pub fn last_persist_error(&self) -> Option<&VfsError> {
        self.last_persist_error.as_ref()
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Removes and returns buffered log entries
    pub fn drain_logs(&mut self) -> Vec<LogEntry> {
        self.logger.drain()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shuts the engine down, handing back its store
    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> VfsOperations for VfsEngine<S> {
    fn list(&self, path: Option<&str>) -> Result<&[Entry], VfsError> {
        let names = match path {
            None => self.effective_location(),
            Some(path) => PathResolver::resolve(&self.root, path, &self.location)?,
        };
        let dir = PathResolver::lookup(&self.root, &names)
            .ok_or_else(|| VfsError::NotFound(PathResolver::display(&names)))?;
        Ok(dir.children().unwrap_or_default())
    }

    fn change_directory(&mut self, path: &str) -> Result<(), VfsError> {
        let names = PathResolver::resolve(&self.root, path, &self.location)?;
        self.location = names;
        self.record(
            LogEntry::new(LogLevel::Debug, "changed directory")
                .with_field("path", PathResolver::display(&self.location)),
        );
        self.persist();
        Ok(())
    }

    fn read(&self, name: &str) -> Result<&str, VfsError> {
        self.working_dir()
            .child(name)
            .and_then(|e| e.content())
            .ok_or_else(|| VfsError::NotFound(name.to_string()))
    }

    fn write(&mut self, name: &str, content: &str, mode: WriteMode) -> Result<(), VfsError> {
        Self::check_name(name)?;
        let now = self.clock.now();
        let dir = self.working_dir_mut()?;

        match dir.child(name).map(|e| e.is_file()) {
            Some(false) => return Err(VfsError::AlreadyExists(name.to_string())),
            Some(true) => {
                if let Some(file) = dir.child_mut(name) {
                    match mode {
                        WriteMode::Replace => file.set_content(content, now),
                        WriteMode::Append => file.append_content(content, now),
                    };
                }
            }
            None => {
                dir.add_child(Entry::file(name, content, now), now);
            }
        }

        self.record(
            LogEntry::new(LogLevel::Debug, "wrote file")
                .with_field("name", name)
                .with_field("mode", format!("{:?}", mode)),
        );
        self.persist();
        Ok(())
    }

    fn create(&mut self, name: &str, content: &str) -> Result<(), VfsError> {
        Self::check_name(name)?;
        let now = self.clock.now();
        let dir = self.working_dir_mut()?;

        if !dir.add_child(Entry::file(name, content, now), now) {
            return Err(VfsError::AlreadyExists(name.to_string()));
        }

        self.record(LogEntry::new(LogLevel::Debug, "created file").with_field("name", name));
        self.persist();
        Ok(())
    }

    fn mkdir(&mut self, name: &str) -> Result<(), VfsError> {
        Self::check_name(name)?;
        let now = self.clock.now();
        let dir = self.working_dir_mut()?;

        if !dir.add_child(Entry::directory(name, now), now) {
            return Err(VfsError::AlreadyExists(name.to_string()));
        }

        self.record(LogEntry::new(LogLevel::Debug, "created directory").with_field("name", name));
        self.persist();
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), VfsError> {
        // Rejects "/" too, so the root is never a target.
        Self::check_name(name)?;
        let now = self.clock.now();
        let dir = self.working_dir_mut()?;

        dir.remove_child(name, now)
            .ok_or_else(|| VfsError::NotFound(name.to_string()))?;

        self.record(LogEntry::new(LogLevel::Debug, "deleted entry").with_field("name", name));
        self.persist();
        Ok(())
    }

    fn stat(&self, path: &str) -> Result<&Entry, VfsError> {
        let names = PathResolver::resolve_entry(&self.root, path, &self.location)?;
        let Some((last, parents)) = names.split_last() else {
            return Ok(&self.root);
        };
        PathResolver::lookup(&self.root, parents)
            .and_then(|dir| dir.child(last))
            .ok_or_else(|| VfsError::NotFound(path.to_string()))
    }

    fn complete(&self, token: &str) -> Result<Completion, VfsError> {
        let (dir_part, partial) = split_token(token);
        let names = if dir_part.is_empty() {
            self.effective_location()
        } else {
            PathResolver::resolve(&self.root, dir_part, &self.location)?
        };
        let dir = PathResolver::lookup(&self.root, &names)
            .ok_or_else(|| VfsError::NotFound(dir_part.to_string()))?;
        Ok(Completion::from_directory(dir, dir_part, partial))
    }

    fn reset(&mut self) {
        let now = self.clock.now();
        self.root = seed_tree(now);
        self.location = self.config.home.clone();
        self.record(
            LogEntry::new(LogLevel::Info, "reset to seed layout")
                .with_field("location", self.config.home_path()),
        );
        self.persist();
    }

    fn current_path_string(&self) -> String {
        PathResolver::display(&self.effective_location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::LogicalClock;
    use crate::storage::MemoryStore;

    fn engine() -> VfsEngine<MemoryStore> {
        VfsEngine::init_with(
            MemoryStore::new(),
            VfsConfig::default(),
            Box::new(LogicalClock::new(100)),
        )
    }

    fn names(entries: &[Entry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_init_seeds_empty_store() {
        let vfs = engine();
        assert!(matches!(vfs.init_outcome(), InitOutcome::Seeded { .. }));
        assert_eq!(vfs.current_path_string(), "/home/user");
        assert_eq!(vfs.store().len(), 2);
        assert!(vfs.last_persist_error().is_none());
    }

    #[test]
    fn test_list_working_directory() {
        let vfs = engine();
        let entries = vfs.list(None).unwrap();
        assert_eq!(names(entries), vec!["readme.txt", "notes.txt"]);
    }

    #[test]
    fn test_list_file_is_not_found() {
        let vfs = engine();
        assert_eq!(
            vfs.list(Some("readme.txt")),
            Err(VfsError::NotFound("readme.txt".to_string()))
        );
    }

    #[test]
    fn test_change_directory_failure_keeps_location() {
        let mut vfs = engine();
        assert!(vfs.change_directory("/nope").is_err());
        assert_eq!(vfs.current_path_string(), "/home/user");

        assert!(vfs.change_directory("readme.txt").is_err());
        assert_eq!(vfs.current_path_string(), "/home/user");
    }

    #[test]
    fn test_create_updates_parent_modified() {
        let mut vfs = engine();
        let before = vfs.list(Some("..")).unwrap()[0].modified;

        vfs.create("new.txt", "").unwrap();

        let after = vfs.stat("/home/user").unwrap().modified;
        assert!(after > before);
        let file = vfs.stat("new.txt").unwrap();
        assert_eq!(file.created, after);
    }

    #[test]
    fn test_write_onto_directory_fails() {
        let mut vfs = engine();
        vfs.mkdir("docs").unwrap();
        assert_eq!(
            vfs.write("docs", "x", WriteMode::Replace),
            Err(VfsError::AlreadyExists("docs".to_string()))
        );
        assert!(vfs.stat("docs").unwrap().is_directory());
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut vfs = engine();
        for name in ["", ".", "..", "/", "a/b"] {
            assert_eq!(
                vfs.create(name, ""),
                Err(VfsError::InvalidName(name.to_string()))
            );
            assert!(vfs.mkdir(name).is_err());
            assert!(vfs.delete(name).is_err());
        }
        assert_eq!(vfs.list(None).unwrap().len(), 2);
    }

    #[test]
    fn test_read_directory_is_not_found() {
        let mut vfs = engine();
        vfs.mkdir("docs").unwrap();
        assert_eq!(vfs.read("docs"), Err(VfsError::NotFound("docs".to_string())));
    }

    #[test]
    fn test_read_empty_file() {
        let mut vfs = engine();
        vfs.create("empty", "").unwrap();
        assert_eq!(vfs.read("empty"), Ok(""));
    }

    #[test]
    fn test_stat_root_and_files() {
        let vfs = engine();
        assert_eq!(vfs.stat("/").unwrap().name, "/");
        assert_eq!(vfs.stat("").unwrap().name, "user");
        assert_eq!(vfs.stat("/etc/hostname").unwrap().content(), Some("miniOS"));
        assert!(vfs.stat("/etc/missing").is_err());
    }

    #[test]
    fn test_complete() {
        let vfs = engine();
        assert_eq!(
            vfs.complete("rea").unwrap(),
            Completion::Unique("readme.txt".to_string())
        );
        assert_eq!(
            vfs.complete("/e").unwrap(),
            Completion::Unique("/etc".to_string())
        );
        assert_eq!(vfs.complete("zzz").unwrap(), Completion::NoMatch);
        assert!(vfs.complete("/missing/x").is_err());
    }

    #[test]
    fn test_mutations_are_logged() {
        let mut vfs = engine();
        vfs.drain_logs();

        vfs.mkdir("docs").unwrap();
        let logs = vfs.drain_logs();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].message, "created directory");
        assert_eq!(logs[0].field("name"), Some("docs"));
        assert_eq!(logs[0].source.as_deref(), Some("vfs"));
    }

    #[test]
    fn test_dangling_location_falls_back_to_root() {
        let mut vfs = engine();
        vfs.location = vec!["gone".to_string()];

        assert_eq!(vfs.current_path_string(), "/");
        assert_eq!(
            names(vfs.list(None).unwrap()),
            vec!["bin", "etc", "home", "var"]
        );
        vfs.create("at_root", "").unwrap();
        assert!(vfs.tree().child("at_root").is_some());
    }
}
