//! Error types for the tree crate.

use std::path::PathBuf;

/// Errors that can occur while validating roots or walking trees.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// A required root does not exist.
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    /// A required root exists but is not a directory.
    #[error("{} doesn't reference an existing directory", .0.display())]
    NotADirectory(PathBuf),

    /// A directory could not be listed (e.g. it vanished mid-walk).
    #[error("failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Recursive enumeration failed.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
