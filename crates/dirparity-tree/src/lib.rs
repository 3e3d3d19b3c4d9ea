//! Directory tree shape comparison.
//!
//! Walks two directory roots in lock-step and reports the entries that exist
//! under only one of them, and enumerates the regular files both roots share.
//!
//! # Key Types
//!
//! - [`DirectoryRoot`] -- A validated, absolute directory path
//! - [`RelativeEntry`] -- A path relative to its root
//! - [`TreeComparator`] / [`AsymmetryReport`] -- Tree-shape diff (left-only/right-only entries)
//! - [`common_files`] -- Files present as regular files under both roots

pub mod common;
pub mod compare;
pub mod error;
pub mod root;

pub use common::common_files;
pub use compare::{compare_trees, AsymmetryReport, TreeComparator, DEFAULT_IGNORES};
pub use error::{TreeError, TreeResult};
pub use root::{DirectoryRoot, RelativeEntry};
