//! # Logger Service
//!
//! This crate implements structured logging for the VFS engine.
//!
//! ## Philosophy
//!
//! Logging is explicit and structured, not text-based or printf-style.
//! Entries are kept in a bounded in-memory buffer owned by whoever logs,
//! so tests can assert on them and a front end can drain and render them.

use std::collections::VecDeque;
use std::fmt;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Debug information
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Source component (if known)
    pub source: Option<String>,
    /// Log message
    pub message: String,
    /// Structured fields
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    /// Creates a new log entry
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            source: None,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Sets the source component
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a field to the log entry
    pub fn with_field(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push((key.into(), value.to_string()));
        self
    }

    /// Looks up a field value by key
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.level)?;
        if let Some(source) = &self.source {
            write!(f, " {}:", source)?;
        }
        write!(f, " {}", self.message)?;
        for (key, value) in &self.fields {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

/// Bounded in-memory log buffer
///
/// Entries below `min_level` are discarded; past `capacity` the oldest
/// entry is evicted.
#[derive(Debug, Clone)]
pub struct Logger {
    min_level: LogLevel,
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl Logger {
    /// Default buffer capacity
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Creates a logger that keeps everything from `Debug` up
    pub fn new(capacity: usize) -> Self {
        Self::with_min_level(capacity, LogLevel::Debug)
    }

    /// Creates a logger with a minimum level
    pub fn with_min_level(capacity: usize, min_level: LogLevel) -> Self {
        Self {
            min_level,
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    /// Changes the minimum level
    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Records an entry
    pub fn log(&mut self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Debug, message));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Info, message));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Warn, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.log(LogEntry::new(LogLevel::Error, message));
    }

    /// Buffered entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Removes and returns all buffered entries
    pub fn drain(&mut self) -> Vec<LogEntry> {
        self.entries.drain(..).collect()
    }

    /// Counts buffered entries at or above a level
    pub fn count_at_least(&self, level: LogLevel) -> usize {
        self.entries.iter().filter(|e| e.level >= level).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_entry_creation() {
        let entry = LogEntry::new(LogLevel::Info, "test message");
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "test message");
        assert!(entry.source.is_none());
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_log_entry_with_source() {
        let entry = LogEntry::new(LogLevel::Info, "test").with_source("vfs");
        assert_eq!(entry.source.as_deref(), Some("vfs"));
    }

    #[test]
    fn test_log_entry_with_fields() {
        let entry = LogEntry::new(LogLevel::Info, "test")
            .with_field("key1", "value1")
            .with_field("key2", 42);

        assert_eq!(entry.fields.len(), 2);
        assert_eq!(entry.fields[0].0, "key1");
        assert_eq!(entry.field("key2"), Some("42"));
        assert_eq!(entry.field("missing"), None);
    }

    #[test]
    fn test_log_entry_display() {
        let entry = LogEntry::new(LogLevel::Warn, "persist failed")
            .with_source("vfs")
            .with_field("key", "fileSystemTree");
        assert_eq!(
            entry.to_string(),
            "[WARN] vfs: persist failed key=fileSystemTree"
        );
    }

    #[test]
    fn test_logger_min_level() {
        let mut logger = Logger::with_min_level(8, LogLevel::Info);
        logger.debug("dropped");
        logger.info("kept");
        logger.error("kept too");

        assert_eq!(logger.len(), 2);
        assert_eq!(logger.count_at_least(LogLevel::Warn), 1);
    }

    #[test]
    fn test_logger_evicts_oldest() {
        let mut logger = Logger::new(2);
        logger.info("one");
        logger.info("two");
        logger.info("three");

        let messages: Vec<&str> = logger.entries().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_logger_drain() {
        let mut logger = Logger::default();
        logger.warn("a");
        logger.warn("b");

        let drained = logger.drain();
        assert_eq!(drained.len(), 2);
        assert!(logger.is_empty());
    }
}
