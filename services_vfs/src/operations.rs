//! Filesystem operations
//!
//! This module defines the operations a VFS engine exposes to its
//! dispatcher. Names are bare entry names in the working directory;
//! paths are full path expressions.

use crate::error::VfsError;
use vfs_tree::{Completion, Entry};

/// How `write` treats an existing file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Replace the content
    #[default]
    Replace,
    /// Append after a line break
    Append,
}

/// Filesystem operations trait
pub trait VfsOperations {
    /// List directory contents
    ///
    /// `None` lists the working directory. Files are not listable.
    fn list(&self, path: Option<&str>) -> Result<&[Entry], VfsError>;

    /// Change the working location
    ///
    /// On failure the working location is unchanged.
    fn change_directory(&mut self, path: &str) -> Result<(), VfsError>;

    /// Read a file in the working directory
    fn read(&self, name: &str) -> Result<&str, VfsError>;

    /// Write a file in the working directory, creating it if absent
    fn write(&mut self, name: &str, content: &str, mode: WriteMode) -> Result<(), VfsError>;

    /// Create a new file in the working directory
    fn create(&mut self, name: &str, content: &str) -> Result<(), VfsError>;

    /// Create a new empty directory in the working directory
    fn mkdir(&mut self, name: &str) -> Result<(), VfsError>;

    /// Remove an entry (and its subtree) from the working directory
    fn delete(&mut self, name: &str) -> Result<(), VfsError>;

    /// Look up any entry by path
    fn stat(&self, path: &str) -> Result<&Entry, VfsError>;

    /// Complete the last segment of a partial path token
    fn complete(&self, token: &str) -> Result<Completion, VfsError>;

    /// Restore the seed layout and home location
    fn reset(&mut self);

    /// The working location as a display path
    fn current_path_string(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_write_mode() {
        assert_eq!(WriteMode::default(), WriteMode::Replace);
    }
}
