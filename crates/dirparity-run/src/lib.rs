//! Comparison run driver.
//!
//! Turns a [`RunConfig`] into a [`RunContext`] (validated roots, resolved
//! output directory, common files computed once) and executes the tree-shape
//! check plus one content check per common file, collecting a [`RunReport`].
//!
//! # Key Types
//!
//! - [`RunConfig`] -- Serializable run settings (TOML-loadable)
//! - [`RunContext`] -- Per-invocation state shared read-only by all checks
//! - [`TreeCheck`] / [`FileCheck`] / [`FileOutcome`] -- Individual check results
//! - [`RunReport`] -- Conjunction of all checks

pub mod check;
pub mod config;
pub mod context;
pub mod error;
pub mod report;

pub use check::{FileCheck, FileOutcome, TreeCheck};
pub use config::{timestamp_dir_name, RunConfig};
pub use context::RunContext;
pub use error::{RunError, RunResult};
pub use report::RunReport;
