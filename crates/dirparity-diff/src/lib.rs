//! Content comparison and HTML diff artifacts.
//!
//! Decides whether two files are byte-identical and, when they are not,
//! renders a side-by-side line diff as a self-contained HTML page that can be
//! written next to other test outputs.
//!
//! # Key Types
//!
//! - [`files_are_identical`] -- Full byte-for-byte comparison
//! - [`descriptive_label`] -- `<parent>_<sanitized name>` display label
//! - [`TextDecodeResult`] -- Decoded lines or "not text"
//! - [`HtmlDiffOptions`] / [`generate_html_diff`] -- Diff rendering
//! - [`OutputTarget`] / [`DiffArtifact`] / [`write_html_diff`] -- Persistence

pub mod artifact;
pub mod content;
pub mod error;
pub mod html;
pub mod label;
pub mod text;

pub use artifact::{write_html_diff, DiffArtifact, OutputTarget};
pub use content::files_are_identical;
pub use error::{DiffError, DiffResult};
pub use html::{generate_html_diff, render_html_diff, HtmlDiffOptions};
pub use label::{artifact_file_name, descriptive_label, relative_label};
pub use text::{decode_lines, load_text_file, split_lines, TextDecodeResult, TextFile};
