//! Path resolution logic
//!
//! This module turns a path expression plus a working location into the
//! sequence of names from the root that it denotes.

use crate::entry::Entry;
use thiserror::Error;

/// Errors that can occur during path resolution
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path component not found during traversal
    #[error("Not found: {0}")]
    NotFound(String),

    /// Attempted to traverse through a file
    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

/// Path resolver
///
/// Resolution is strictly left to right with no backtracking: the first
/// missing segment aborts the whole resolution.
pub struct PathResolver;

impl PathResolver {
    /// Splits a path into components, dropping empty ones
    ///
    /// Repeated and trailing slashes collapse.
    ///
    /// # Examples
    ///
    /// ```
    /// use vfs_tree::PathResolver;
    ///
    /// assert_eq!(PathResolver::split_path("/home//user/"), vec!["home", "user"]);
    /// assert_eq!(PathResolver::split_path("../notes.txt"), vec!["..", "notes.txt"]);
    /// assert!(PathResolver::split_path("/").is_empty());
    /// ```
    pub fn split_path(path: &str) -> Vec<&str> {
        path.split('/').filter(|c| !c.is_empty()).collect()
    }

    /// Validates a single entry name
    ///
    /// Returns true if the name is valid for a directory entry.
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains('/')
            && !name.contains('\0')
    }

    /// Renders a location as a display path (root is `/`)
    pub fn display(location: &[String]) -> String {
        if location.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for name in location {
            out.push('/');
            out.push_str(name);
        }
        out
    }

    /// Walks a sequence of directory names from the root
    ///
    /// Returns `None` if any name is missing or is not a directory.
    pub fn lookup<'a>(root: &'a Entry, location: &[String]) -> Option<&'a Entry> {
        let mut current = root;
        for name in location {
            current = current.child(name).filter(|e| e.is_directory())?;
        }
        Some(current)
    }

    /// Mutable variant of [`PathResolver::lookup`]
    pub fn lookup_mut<'a>(root: &'a mut Entry, location: &[String]) -> Option<&'a mut Entry> {
        let mut current = root;
        for name in location {
            current = current.child_mut(name).filter(|e| e.is_directory())?;
        }
        Some(current)
    }

    /// Returns the working location if it still resolves, else the root
    pub fn effective_location(root: &Entry, location: &[String]) -> Vec<String> {
        match Self::lookup(root, location) {
            Some(_) => location.to_vec(),
            None => Vec::new(),
        }
    }

    /// Resolves a path expression to a directory
    ///
    /// Every named segment must be a directory. An empty expression yields
    /// the working location.
    pub fn resolve(
        root: &Entry,
        path: &str,
        location: &[String],
    ) -> Result<Vec<String>, PathError> {
        Self::walk(root, path, location, false)
    }

    /// Resolves a path expression whose final segment may be a file
    pub fn resolve_entry(
        root: &Entry,
        path: &str,
        location: &[String],
    ) -> Result<Vec<String>, PathError> {
        Self::walk(root, path, location, true)
    }

    fn walk(
        root: &Entry,
        path: &str,
        location: &[String],
        allow_file: bool,
    ) -> Result<Vec<String>, PathError> {
        let mut names = if path.starts_with('/') {
            Vec::new()
        } else {
            Self::effective_location(root, location)
        };

        // Directories visited so far, parallel to `names` (plus the root).
        let mut stack: Vec<&Entry> = Vec::with_capacity(names.len() + 1);
        stack.push(root);
        for name in &names {
            if let Some(dir) = stack.last().and_then(|d| d.child(name)) {
                stack.push(dir);
            }
        }

        let components = Self::split_path(path);
        let last = components.len().saturating_sub(1);
        for (i, component) in components.iter().enumerate() {
            match *component {
                "." => {}
                ".." => {
                    if names.pop().is_some() {
                        stack.pop();
                    }
                }
                name => {
                    let current = stack.last().copied().unwrap_or(root);
                    let entry = current
                        .child(name)
                        .ok_or_else(|| PathError::NotFound(name.to_string()))?;
                    if entry.is_file() && !(allow_file && i == last) {
                        return Err(PathError::NotADirectory(name.to_string()));
                    }
                    names.push(name.to_string());
                    stack.push(entry);
                }
            }
        }

        Ok(names)
    }
}
