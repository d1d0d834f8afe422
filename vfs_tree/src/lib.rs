//! # VFS Tree
//!
//! This crate provides the in-memory namespace of the virtual filesystem:
//! the entry model, the path resolver and completion matching.
//!
//! ## Design
//!
//! - An [`Entry`] is either a File (content + size) or a Directory (ordered children);
//!   the exclusivity is carried by [`EntryKind`], not by optional fields
//! - There is exactly one root Directory, named `/`
//! - A working location is the sequence of directory names from the root
//! - Resolution is a pure function of (tree, path expression, working location)
//!
//! Nothing here performs I/O or reads a clock; callers pass timestamps in.

pub mod completion;
pub mod entry;
pub mod path;

pub use completion::{split_token, Completion, CompletionCandidate};
pub use entry::{
    Entry, EntryError, EntryKind, Timestamp, DIR_PERMISSIONS, EXEC_PERMISSIONS,
    FILE_PERMISSIONS, ROOT_NAME,
};
pub use path::{PathError, PathResolver};
