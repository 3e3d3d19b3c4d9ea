//! Normalized path types used at the comparison boundary.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};

/// An existing directory, stored as a canonical absolute path.
///
/// Constructed once per run; the comparison layers only ever see this type,
/// never raw strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DirectoryRoot(PathBuf);

impl DirectoryRoot {
    /// Validate `path` and resolve it to a canonical absolute directory.
    pub fn open(path: impl AsRef<Path>) -> TreeResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TreeError::PathNotFound(path.to_path_buf()));
        }
        if !path.is_dir() {
            return Err(TreeError::NotADirectory(path.to_path_buf()));
        }
        let canonical = path.canonicalize().map_err(|source| TreeError::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self(canonical))
    }

    /// The absolute path of this root.
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Resolve a relative entry against this root.
    pub fn join(&self, entry: &RelativeEntry) -> PathBuf {
        self.0.join(entry.as_path())
    }
}

impl AsRef<Path> for DirectoryRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for DirectoryRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A path expressed relative to a [`DirectoryRoot`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelativeEntry(PathBuf);

impl RelativeEntry {
    /// Wrap a relative path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// The final component, or the empty string for an empty entry.
    pub fn file_name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl From<&str> for RelativeEntry {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let root = DirectoryRoot::open(dir.path()).unwrap();
        assert!(root.path().is_absolute());
        assert!(root.path().is_dir());
    }

    #[test]
    fn open_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = DirectoryRoot::open(dir.path().join("missing"));
        assert!(matches!(result, Err(TreeError::PathNotFound(_))));
    }

    #[test]
    fn open_regular_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, b"x").unwrap();
        let result = DirectoryRoot::open(&file);
        assert!(matches!(result, Err(TreeError::NotADirectory(_))));
    }

    #[test]
    fn join_relative_entry() {
        let dir = tempfile::tempdir().unwrap();
        let root = DirectoryRoot::open(dir.path()).unwrap();
        let entry = RelativeEntry::from("sub/a.txt");
        assert_eq!(root.join(&entry), root.path().join("sub").join("a.txt"));
        assert_eq!(entry.file_name(), "a.txt");
    }
}
