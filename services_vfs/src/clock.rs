//! Timestamp sources.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};
use vfs_tree::Timestamp;

/// Source of entry timestamps
pub trait Clock {
    /// Returns the current time
    fn now(&self) -> Timestamp;
}

/// Wall-clock milliseconds since the Unix epoch
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }
}

/// Deterministic clock that advances by one on every reading
#[derive(Debug, Clone)]
pub struct LogicalClock {
    next: Cell<Timestamp>,
}

impl LogicalClock {
    /// Creates a clock whose first reading is `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            next: Cell::new(start),
        }
    }

    /// Returns the value of the next reading without advancing
    pub fn peek(&self) -> Timestamp {
        self.next.get()
    }
}

impl Default for LogicalClock {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Clock for LogicalClock {
    fn now(&self) -> Timestamp {
        let current = self.next.get();
        self.next.set(current + 1);
        current
    }
}
