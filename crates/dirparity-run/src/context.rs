//! The per-invocation run context.
//!
//! Built once from a [`RunConfig`]; afterwards it is only read, so checks can
//! be executed from several worker threads without locking.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use dirparity_diff::{
    artifact_file_name, files_are_identical, relative_label, write_html_diff, OutputTarget,
};
use dirparity_tree::{common_files, DirectoryRoot, RelativeEntry, TreeComparator};

use crate::check::{FileCheck, FileOutcome, TreeCheck};
use crate::config::RunConfig;
use crate::error::{RunError, RunResult};
use crate::report::RunReport;

pub struct RunContext {
    config: RunConfig,
    from: DirectoryRoot,
    to: DirectoryRoot,
    output_dir: PathBuf,
    common_files: Vec<RelativeEntry>,
    artifact_paths: BTreeMap<RelativeEntry, PathBuf>,
    comparator: TreeComparator,
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("output_dir", &self.output_dir)
            .field("common_files", &self.common_files.len())
            .finish()
    }
}

impl RunContext {
    /// Validate the configuration and prepare a run starting now.
    pub fn new(config: RunConfig) -> RunResult<Self> {
        Self::started_at(config, Local::now().naive_local())
    }

    /// Like [`RunContext::new`] with an explicit start time, which names the
    /// timestamped output subdirectory.
    pub fn started_at(config: RunConfig, started: NaiveDateTime) -> RunResult<Self> {
        let from_dir = config.from_dir.as_ref().ok_or(RunError::MissingRoot("from_dir"))?;
        let to_dir = config.to_dir.as_ref().ok_or(RunError::MissingRoot("to_dir"))?;
        let from = DirectoryRoot::open(from_dir)?;
        let to = DirectoryRoot::open(to_dir)?;

        let output_dir = config.resolve_output_dir(started)?;
        let common_files = common_files(&from, &to)?;
        let artifact_paths = assign_artifact_paths(&from, &to, &common_files, &output_dir);
        let comparator = TreeComparator::with_ignored(config.ignore.iter().map(String::as_str));

        info!(
            from = %from,
            to = %to,
            output_dir = %output_dir.display(),
            common_files = common_files.len(),
            "comparison run prepared"
        );

        Ok(Self {
            config,
            from,
            to,
            output_dir,
            common_files,
            artifact_paths,
            comparator,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn from_root(&self) -> &DirectoryRoot {
        &self.from
    }

    pub fn to_root(&self) -> &DirectoryRoot {
        &self.to
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Files present under both roots, computed once when the context was built.
    pub fn common_files(&self) -> &[RelativeEntry] {
        &self.common_files
    }

    /// The tree-shape check, or `None` when it is disabled.
    pub fn check_tree(&self) -> RunResult<Option<TreeCheck>> {
        if self.config.skip_tree_comparison {
            debug!("tree comparison skipped");
            return Ok(None);
        }
        let asymmetry = self.comparator.compare(&self.from, &self.to)?;
        Ok(Some(TreeCheck { asymmetry }))
    }

    /// Compare one common file and write a diff artifact if it differs.
    ///
    /// Never fails: problems with this pair are recorded in the outcome so the
    /// remaining pairs are still checked.
    pub fn check_file(&self, file: &RelativeEntry) -> FileCheck {
        let from = self.from.join(file);
        let to = self.to.join(file);

        let outcome = match files_are_identical(&from, &to) {
            Ok(true) => FileOutcome::Identical,
            Ok(false) => {
                let target = match self.artifact_paths.get(file) {
                    Some(path) => OutputTarget::File(path.clone()),
                    None => OutputTarget::Directory(self.output_dir.clone()),
                };
                match write_html_diff(&from, &to, &target, &self.config.diff) {
                    Ok(artifact) => FileOutcome::Differs { artifact },
                    Err(e) => {
                        if e.is_recoverable() {
                            warn!(file = %file, reason = %e, "content differs, no diff available");
                        } else {
                            warn!(file = %file, error = %e, "failed to write diff artifact");
                        }
                        FileOutcome::DiffUnavailable { reason: e.to_string() }
                    }
                }
            }
            Err(e) => {
                warn!(file = %file, error = %e, "failed to compare files");
                FileOutcome::Unreadable { reason: e.to_string() }
            }
        };

        debug!(file = %file, passed = matches!(outcome, FileOutcome::Identical), "file checked");
        FileCheck {
            file: file.clone(),
            outcome,
        }
    }

    /// Check every common file, in parallel when configured.
    ///
    /// Results keep the order of [`RunContext::common_files`].
    pub fn check_files(&self) -> Vec<FileCheck> {
        let check = |file: &RelativeEntry| self.check_file(file);

        let pool = match self.config.jobs {
            0 => None,
            n => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                Ok(pool) => Some(pool),
                Err(e) => {
                    warn!(jobs = n, error = %e, "failed to build worker pool; using the global pool");
                    None
                }
            },
        };

        match pool {
            Some(pool) => pool.install(|| self.common_files.par_iter().map(check).collect()),
            None => self.common_files.par_iter().map(check).collect(),
        }
    }

    /// Run every enabled check.
    pub fn run(&self) -> RunResult<RunReport> {
        let tree = self.check_tree()?;
        let files = self.check_files();
        let report = RunReport::new(
            self.from.path().to_path_buf(),
            self.to.path().to_path_buf(),
            self.output_dir.clone(),
            tree,
            files,
        );
        info!(
            passed = report.passed,
            files = report.files.len(),
            failed = report.failed_count(),
            "comparison run finished"
        );
        Ok(report)
    }
}

/// One artifact path per common file, distinct across the run.
///
/// Files whose `<parent>_<name>` artifact names collide are named after their
/// whole relative path instead; a name that is still taken gets a numeric
/// suffix.
fn assign_artifact_paths(
    from: &DirectoryRoot,
    to: &DirectoryRoot,
    files: &[RelativeEntry],
    output_dir: &Path,
) -> BTreeMap<RelativeEntry, PathBuf> {
    let defaults: Vec<String> = files
        .iter()
        .map(|file| artifact_file_name(&from.join(file), &to.join(file)))
        .collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in &defaults {
        *counts.entry(name.as_str()).or_default() += 1;
    }

    let mut taken = HashSet::new();
    let mut paths = BTreeMap::new();
    for (file, default) in files.iter().zip(&defaults) {
        let base = if counts.get(default.as_str()).copied().unwrap_or(0) > 1 {
            let label = relative_label(file.as_path());
            debug!(file = %file, default = %default, "artifact name collides; using full path");
            format!("{label}_vs_{label}")
        } else {
            default.trim_end_matches(".html").to_owned()
        };

        let mut name = format!("{base}.html");
        let mut n = 2;
        while !taken.insert(name.clone()) {
            name = format!("{base}_{n}.html");
            n += 1;
        }
        paths.insert(file.clone(), output_dir.join(name));
    }
    paths
}
