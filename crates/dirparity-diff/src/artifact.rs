//! Persisting rendered diffs as HTML artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DiffError, DiffResult};
use crate::html::{generate_html_diff, HtmlDiffOptions};
use crate::label::artifact_file_name;

/// Where an artifact should be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// An explicit `.html` file path, used verbatim.
    File(PathBuf),
    /// A directory; the file name is derived from the two input labels.
    Directory(PathBuf),
}

impl OutputTarget {
    /// Classify `path` by its extension: `.html` is a file, anything else a
    /// directory.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.extension().is_some_and(|ext| ext == "html") {
            Self::File(path)
        } else {
            Self::Directory(path)
        }
    }

    /// The concrete file path for a diff of `from` against `to`.
    pub fn resolve(&self, from: &Path, to: &Path) -> PathBuf {
        match self {
            Self::File(path) => path.clone(),
            Self::Directory(dir) => dir.join(artifact_file_name(from, to)),
        }
    }
}

/// A rendered HTML diff and the absolute path it belongs at.
///
/// Written once by [`DiffArtifact::persist`]; never modified afterwards.
#[derive(Clone, Debug)]
pub struct DiffArtifact {
    pub path: PathBuf,
    pub html: String,
}

impl DiffArtifact {
    /// Render the diff of two files and resolve its output path.
    pub fn render(
        from: &Path,
        to: &Path,
        target: &OutputTarget,
        options: &HtmlDiffOptions,
    ) -> DiffResult<Self> {
        let html = generate_html_diff(from, to, options)?;
        let resolved = target.resolve(from, to);
        let path = std::path::absolute(&resolved).map_err(|e| DiffError::io(&resolved, e))?;
        Ok(Self { path, html })
    }

    /// Write the document, creating parent directories as needed and
    /// overwriting any previous file at the same path.
    pub fn persist(&self) -> DiffResult<&Path> {
        if let Some(parent) = self.path.parent() {
            // create_dir_all tolerates directories created concurrently.
            fs::create_dir_all(parent).map_err(|e| DiffError::io(parent, e))?;
        }
        fs::write(&self.path, &self.html).map_err(|e| DiffError::io(&self.path, e))?;
        debug!(path = %self.path.display(), bytes = self.html.len(), "wrote diff artifact");
        Ok(&self.path)
    }
}

/// Render and write the diff of `from` against `to`; returns the absolute
/// path of the written artifact.
pub fn write_html_diff(
    from: &Path,
    to: &Path,
    target: &OutputTarget,
    options: &HtmlDiffOptions,
) -> DiffResult<PathBuf> {
    let artifact = DiffArtifact::render(from, to, target, options)?;
    artifact.persist()?;
    Ok(artifact.path)
}
