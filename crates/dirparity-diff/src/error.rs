//! Error types for the diff crate.

use std::path::PathBuf;

/// Errors that can occur while comparing files or producing diff artifacts.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// A required file does not exist.
    #[error("{} doesn't reference an existing file", .0.display())]
    PathNotFound(PathBuf),

    /// A path expected to be a regular file is a directory.
    #[error("{} is a directory", .0.display())]
    NotAFile(PathBuf),

    /// The file is not valid UTF-8 text.
    #[error("Binary files diff are not supported: {}", .0.display())]
    BinaryFileNotSupported(PathBuf),

    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiffError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether a run may carry on with other file pairs after this error.
    ///
    /// Only binary content is expected in normal operation; the caller
    /// downgrades it to "content differs, no diff available".
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::BinaryFileNotSupported(_))
    }
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
