//! Entry model
//!
//! This module defines the nodes of the namespace and the structural
//! invariants they maintain.

use crate::path::PathResolver;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Timestamp of an entry (clock units chosen by the caller)
pub type Timestamp = u64;

/// Name of the root directory
pub const ROOT_NAME: &str = "/";

/// Display permissions for directories
pub const DIR_PERMISSIONS: &str = "drwxr-xr-x";

/// Display permissions for regular files
pub const FILE_PERMISSIONS: &str = "-rw-r--r--";

/// Display permissions for executables
pub const EXEC_PERMISSIONS: &str = "-rwxr-xr-x";

/// Structural problems found when validating a tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// The root entry is a File
    #[error("Root entry is not a directory")]
    RootNotDirectory,

    /// The root entry is not named `/`
    #[error("Root entry has name '{0}', expected '/'")]
    RootName(String),

    /// An entry name is empty, `.`/`..`, or contains `/`
    #[error("Invalid entry name: '{0}'")]
    InvalidName(String),

    /// Two siblings share a name
    #[error("Duplicate entry name: '{0}'")]
    DuplicateName(String),
}

/// The kind-specific payload of an entry
///
/// A File never has children and a Directory never has content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file with whole-text content
    File {
        /// File content
        content: String,
        /// Byte length of `content`
        #[serde(default)]
        size: u64,
    },
    /// Directory with children in creation order
    Directory {
        /// Child entries
        #[serde(default)]
        children: Vec<Entry>,
    },
}

/// A node in the namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Name, unique among siblings
    pub name: String,
    /// Creation time
    pub created: Timestamp,
    /// Last content or structural change
    pub modified: Timestamp,
    /// Cosmetic permission string, never enforced
    pub permissions: String,
    #[serde(flatten)]
    kind: EntryKind,
}

impl Entry {
    /// Creates a new file with the given content
    pub fn file(name: impl Into<String>, content: impl Into<String>, now: Timestamp) -> Self {
        let content = content.into();
        let size = content.len() as u64;
        Self {
            name: name.into(),
            created: now,
            modified: now,
            permissions: FILE_PERMISSIONS.to_string(),
            kind: EntryKind::File { content, size },
        }
    }

    /// Creates a new empty directory
    pub fn directory(name: impl Into<String>, now: Timestamp) -> Self {
        Self {
            name: name.into(),
            created: now,
            modified: now,
            permissions: DIR_PERMISSIONS.to_string(),
            kind: EntryKind::Directory {
                children: Vec::new(),
            },
        }
    }

    /// Creates an empty root directory
    pub fn root(now: Timestamp) -> Self {
        Self::directory(ROOT_NAME, now)
    }

    /// Replaces the display permissions
    pub fn with_permissions(mut self, permissions: impl Into<String>) -> Self {
        self.permissions = permissions.into();
        self
    }

    /// Adds a child and returns self (for building fixed layouts)
    ///
    /// A duplicate name or a non-directory receiver leaves self unchanged.
    pub fn with_child(mut self, child: Entry) -> Self {
        let modified = self.modified;
        self.add_child(child, modified);
        self
    }

    /// Returns the kind payload
    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File { .. })
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }

    /// File content, `None` for directories
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            EntryKind::File { content, .. } => Some(content),
            EntryKind::Directory { .. } => None,
        }
    }

    /// File size in bytes, `None` for directories
    pub fn size(&self) -> Option<u64> {
        match &self.kind {
            EntryKind::File { size, .. } => Some(*size),
            EntryKind::Directory { .. } => None,
        }
    }

    /// Directory children, `None` for files
    pub fn children(&self) -> Option<&[Entry]> {
        match &self.kind {
            EntryKind::Directory { children } => Some(children),
            EntryKind::File { .. } => None,
        }
    }

    /// Gets a direct child by name
    pub fn child(&self, name: &str) -> Option<&Entry> {
        self.children()?.iter().find(|e| e.name == name)
    }

    /// Gets a mutable direct child by name
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Entry> {
        match &mut self.kind {
            EntryKind::Directory { children } => children.iter_mut().find(|e| e.name == name),
            EntryKind::File { .. } => None,
        }
    }

    /// Appends a child to a directory
    ///
    /// Returns false if self is a file or the name is already taken.
    pub fn add_child(&mut self, child: Entry, now: Timestamp) -> bool {
        let EntryKind::Directory { children } = &mut self.kind else {
            return false;
        };
        if children.iter().any(|e| e.name == child.name) {
            return false;
        }
        children.push(child);
        self.modified = now;
        true
    }

    /// Removes a child (and its subtree) from a directory
    pub fn remove_child(&mut self, name: &str, now: Timestamp) -> Option<Entry> {
        let EntryKind::Directory { children } = &mut self.kind else {
            return None;
        };
        let index = children.iter().position(|e| e.name == name)?;
        let removed = children.remove(index);
        self.modified = now;
        Some(removed)
    }

    /// Replaces file content
    ///
    /// Returns false (and changes nothing) for directories.
    pub fn set_content(&mut self, new_content: impl Into<String>, now: Timestamp) -> bool {
        let EntryKind::File { content, size } = &mut self.kind else {
            return false;
        };
        *content = new_content.into();
        *size = content.len() as u64;
        self.modified = now;
        true
    }

    /// Appends to file content, separated by a line break from non-empty content
    pub fn append_content(&mut self, extra: &str, now: Timestamp) -> bool {
        let EntryKind::File { content, size } = &mut self.kind else {
            return false;
        };
        if !content.is_empty() {
            content.push('\n');
        }
        content.push_str(extra);
        *size = content.len() as u64;
        self.modified = now;
        true
    }

    /// Validates a tree rooted at self
    ///
    /// Checks the root shape, name validity and sibling uniqueness.
    /// File sizes that disagree with their content are recomputed.
    pub fn validate_root(&mut self) -> Result<(), EntryError> {
        if self.name != ROOT_NAME {
            return Err(EntryError::RootName(self.name.clone()));
        }
        if !self.is_directory() {
            return Err(EntryError::RootNotDirectory);
        }
        self.validate_children()
    }

    fn validate_children(&mut self) -> Result<(), EntryError> {
        match &mut self.kind {
            EntryKind::File { content, size } => {
                *size = content.len() as u64;
                Ok(())
            }
            EntryKind::Directory { children } => {
                let mut seen = HashSet::new();
                for child in children.iter_mut() {
                    if !PathResolver::is_valid_name(&child.name) {
                        return Err(EntryError::InvalidName(child.name.clone()));
                    }
                    if !seen.insert(child.name.clone()) {
                        return Err(EntryError::DuplicateName(child.name.clone()));
                    }
                    child.validate_children()?;
                }
                Ok(())
            }
        }
    }
}
