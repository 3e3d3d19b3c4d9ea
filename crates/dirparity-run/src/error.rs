//! Error types for the run crate.

use std::path::PathBuf;

use dirparity_tree::TreeError;

/// Errors that abort a whole comparison run.
///
/// Per-file problems never surface here; they are recorded in the
/// corresponding [`FileCheck`](crate::FileCheck).
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// A root is missing from the configuration.
    #[error("missing required setting: {0}")]
    MissingRoot(&'static str),

    /// A root could not be validated or walked.
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`RunConfig`](crate::RunConfig).
    #[error("invalid config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The current working directory could not be determined.
    #[error("cannot resolve working directory: {0}")]
    WorkingDir(#[source] std::io::Error),
}

/// Convenience alias for run results.
pub type RunResult<T> = Result<T, RunError>;
