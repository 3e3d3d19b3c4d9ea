//! Tree-shape diff: pair two directory structures by name, level by level.
//!
//! At every level the entries of both sides are partitioned into left-only,
//! right-only and common. Common entries that are directories on both sides
//! are descended into; everything reported carries its full path relative to
//! the top-level roots.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TreeError, TreeResult};
use crate::root::{DirectoryRoot, RelativeEntry};

/// Names skipped by default when comparing tree shapes.
pub const DEFAULT_IGNORES: &[&str] = &[
    "RCS",
    "CVS",
    "tags",
    ".git",
    ".hg",
    ".bzr",
    "_darcs",
    "__pycache__",
];

/// Entries present under exactly one of the two roots.
///
/// A path appears in at most one of the two lists, and never when it exists
/// with the same kind on both sides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AsymmetryReport {
    /// Present under `from` but not under `to`.
    pub left_only: Vec<RelativeEntry>,
    /// Present under `to` but not under `from`.
    pub right_only: Vec<RelativeEntry>,
}

impl AsymmetryReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if both trees have the same shape.
    pub fn is_symmetric(&self) -> bool {
        self.left_only.is_empty() && self.right_only.is_empty()
    }

    /// Total number of asymmetric entries.
    pub fn len(&self) -> usize {
        self.left_only.len() + self.right_only.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_symmetric()
    }
}

/// Recursive, read-only comparator for two directory trees.
#[derive(Clone, Debug)]
pub struct TreeComparator {
    ignore: BTreeSet<OsString>,
}

impl Default for TreeComparator {
    fn default() -> Self {
        Self::with_ignored(DEFAULT_IGNORES.iter().copied())
    }
}

impl TreeComparator {
    /// A comparator that skips entries with any of the given names.
    pub fn with_ignored<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            ignore: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Compare the shapes of two trees.
    pub fn compare(&self, from: &DirectoryRoot, to: &DirectoryRoot) -> TreeResult<AsymmetryReport> {
        let mut report = AsymmetryReport::new();
        self.compare_level(from.path(), to.path(), Path::new(""), &mut report)?;
        debug!(
            left_only = report.left_only.len(),
            right_only = report.right_only.len(),
            "tree comparison complete"
        );
        Ok(report)
    }

    fn compare_level(
        &self,
        from: &Path,
        to: &Path,
        prefix: &Path,
        report: &mut AsymmetryReport,
    ) -> TreeResult<()> {
        let left = self.list_level(from)?;
        let right = self.list_level(to)?;

        let mut common_dirs = Vec::new();
        for (name, &left_is_dir) in &left {
            match right.get(name) {
                Some(&right_is_dir) if left_is_dir && right_is_dir => common_dirs.push(name),
                // A directory on one side and a file on the other cannot be
                // paired, so it is reported once, on the left.
                Some(&right_is_dir) if left_is_dir != right_is_dir => {
                    report.left_only.push(RelativeEntry::new(prefix.join(name)));
                }
                Some(_) => {}
                None => report.left_only.push(RelativeEntry::new(prefix.join(name))),
            }
        }
        for name in right.keys() {
            if !left.contains_key(name) {
                report.right_only.push(RelativeEntry::new(prefix.join(name)));
            }
        }

        for name in common_dirs {
            let sub = prefix.join(name);
            debug!(dir = %sub.display(), "descending into common directory");
            self.compare_level(&from.join(name), &to.join(name), &sub, report)?;
        }
        Ok(())
    }

    /// List one directory level, sorted by name, mapped to "is a directory".
    fn list_level(&self, dir: &Path) -> TreeResult<BTreeMap<OsString, bool>> {
        let read_dir = fs::read_dir(dir).map_err(|source| TreeError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut entries = BTreeMap::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| TreeError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let name = entry.file_name();
            if self.ignore.contains(&name) {
                continue;
            }
            // Follows symlinks; a dangling link counts as a non-directory.
            let is_dir = entry.path().is_dir();
            entries.insert(name, is_dir);
        }
        Ok(entries)
    }
}

/// Compare two trees with the default ignore list.
pub fn compare_trees(from: &DirectoryRoot, to: &DirectoryRoot) -> TreeResult<AsymmetryReport> {
    TreeComparator::default().compare(from, to)
}
