//! The aggregated result of a comparison run.

use std::path::PathBuf;

use serde::Serialize;

use crate::check::{FileCheck, TreeCheck};

/// The outcome of a whole comparison run.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    /// Conjunction of every check below.
    pub passed: bool,
    pub from_dir: PathBuf,
    pub to_dir: PathBuf,
    pub output_dir: PathBuf,
    /// `None` when the tree-shape check was skipped.
    pub tree: Option<TreeCheck>,
    /// One entry per common file, in enumeration order.
    pub files: Vec<FileCheck>,
}

impl RunReport {
    pub fn new(
        from_dir: PathBuf,
        to_dir: PathBuf,
        output_dir: PathBuf,
        tree: Option<TreeCheck>,
        files: Vec<FileCheck>,
    ) -> Self {
        let passed = tree.as_ref().map_or(true, TreeCheck::passed) && files.iter().all(FileCheck::passed);
        Self {
            passed,
            from_dir,
            to_dir,
            output_dir,
            tree,
            files,
        }
    }

    /// File checks that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &FileCheck> {
        self.files.iter().filter(|c| !c.passed())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
