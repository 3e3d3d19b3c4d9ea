//! Results of the individual checks that make up a run.

use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;

use dirparity_tree::{AsymmetryReport, DirectoryRoot, RelativeEntry};

/// Result of the tree-shape check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreeCheck {
    pub asymmetry: AsymmetryReport,
}

impl TreeCheck {
    pub fn passed(&self) -> bool {
        self.asymmetry.is_symmetric()
    }

    /// Failure message listing each side's unique entries, or `None` when
    /// the shapes match.
    pub fn describe(&self, from: &DirectoryRoot, to: &DirectoryRoot) -> Option<String> {
        if self.passed() {
            return None;
        }
        let mut msg = String::from("Directories tree are different\n");
        let _ = writeln!(msg, "{from} unique files and directories:");
        for entry in &self.asymmetry.left_only {
            let _ = writeln!(msg, "\t- {entry}");
        }
        let _ = writeln!(msg, "{to} unique files and directories:");
        for entry in &self.asymmetry.right_only {
            let _ = writeln!(msg, "\t- {entry}");
        }
        Some(msg)
    }
}

/// What happened when one common file was compared.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Byte-for-byte identical.
    Identical,
    /// Contents differ; an HTML diff was written.
    Differs { artifact: PathBuf },
    /// Contents differ but no diff could be produced (e.g. binary file).
    DiffUnavailable { reason: String },
    /// The pair could not be compared at all.
    Unreadable { reason: String },
}

/// The content check for one common file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FileCheck {
    pub file: RelativeEntry,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileCheck {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Identical)
    }

    /// The artifact path, when one was written.
    pub fn artifact(&self) -> Option<&PathBuf> {
        match &self.outcome {
            FileOutcome::Differs { artifact } => Some(artifact),
            _ => None,
        }
    }

    /// Failure message pointing at the artifact or explaining its absence.
    pub fn describe(&self, from: &DirectoryRoot, to: &DirectoryRoot) -> Option<String> {
        let info = match &self.outcome {
            FileOutcome::Identical => return None,
            FileOutcome::Differs { artifact } => {
                format!("Generated diff file is written to {}", artifact.display())
            }
            FileOutcome::DiffUnavailable { reason } => {
                format!("Failed to generate diff file. Reason: {reason}")
            }
            FileOutcome::Unreadable { reason } => {
                format!("Failed to compare files. Reason: {reason}")
            }
        };
        Some(format!(
            "Content of '{}' files in '{from}' and '{to}' are different.\n{info}",
            self.file.file_name()
        ))
    }
}
