//! Error types for the VFS engine.

use thiserror::Error;
use vfs_tree::PathError;

/// Errors from VFS operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VfsError {
    /// Path segment or name absent, or wrong-kind access
    #[error("Not found: {0}")]
    NotFound(String),

    /// Create collision
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Name is empty, `.`/`..`, or contains `/`
    #[error("Invalid name: '{0}'")]
    InvalidName(String),

    /// Durable store failure (never returned by an operation)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl From<PathError> for VfsError {
    fn from(e: PathError) -> Self {
        match e {
            PathError::NotFound(name) | PathError::NotADirectory(name) => VfsError::NotFound(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_error_conversion() {
        let err: VfsError = PathError::NotFound("docs".to_string()).into();
        assert_eq!(err, VfsError::NotFound("docs".to_string()));

        let err: VfsError = PathError::NotADirectory("a.txt".to_string()).into();
        assert_eq!(err, VfsError::NotFound("a.txt".to_string()));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            VfsError::AlreadyExists("x".to_string()).to_string(),
            "Already exists: x"
        );
        assert_eq!(
            VfsError::InvalidName("/".to_string()).to_string(),
            "Invalid name: '/'"
        );
    }
}
