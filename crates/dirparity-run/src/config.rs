//! Run configuration and output directory resolution.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use dirparity_diff::HtmlDiffOptions;
use dirparity_tree::DEFAULT_IGNORES;

use crate::error::{RunError, RunResult};

/// Settings for one comparison run.
///
/// Every field may be omitted from a TOML file; command-line flags are
/// applied on top of whatever the file provides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// The "from" root, usually the expected (gold) file set.
    pub from_dir: Option<PathBuf>,
    /// The "to" root, usually the actual (new) file set.
    pub to_dir: Option<PathBuf>,
    /// Where diff artifacts go. Defaults to `<cwd>/outputs/testing`.
    pub output_dir: Option<PathBuf>,
    /// Put each run's artifacts in a subdirectory named by the start time.
    pub timestamp_output: bool,
    /// Only compare common files; skip the tree-shape check.
    pub skip_tree_comparison: bool,
    /// HTML rendering options for generated artifacts.
    pub diff: HtmlDiffOptions,
    /// Entry names excluded from the tree-shape check.
    pub ignore: Vec<String>,
    /// Worker threads for file checks; 0 picks the rayon default.
    pub jobs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            from_dir: None,
            to_dir: None,
            output_dir: None,
            timestamp_output: true,
            skip_tree_comparison: false,
            diff: HtmlDiffOptions::default(),
            ignore: DEFAULT_IGNORES.iter().map(|s| s.to_string()).collect(),
            jobs: 0,
        }
    }
}

impl RunConfig {
    /// Parse a TOML configuration file.
    pub fn from_toml_file(path: &Path) -> RunResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| RunError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| RunError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The directory artifacts are written to for a run started at `started`.
    pub fn resolve_output_dir(&self, started: NaiveDateTime) -> RunResult<PathBuf> {
        let base = match &self.output_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()
                .map_err(RunError::WorkingDir)?
                .join("outputs")
                .join("testing"),
        };
        if self.timestamp_output {
            Ok(base.join(timestamp_dir_name(started)))
        } else {
            Ok(base)
        }
    }
}

/// `YYYY-MM-DDTHH-MM-SS`: ISO-8601 to the second, with `:` replaced by `-`
/// so the name is valid on every filesystem.
pub fn timestamp_dir_name(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H-%M-%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 3, 7)
            .unwrap()
    }

    #[test]
    fn default_config() {
        let c = RunConfig::default();
        assert!(c.timestamp_output);
        assert!(!c.skip_tree_comparison);
        assert!(!c.diff.context_only);
        assert_eq!(c.diff.context_lines, 5);
        assert!(c.ignore.iter().any(|n| n == ".git"));
        assert_eq!(c.jobs, 0);
    }

    #[test]
    fn timestamp_name_has_no_colons() {
        assert_eq!(timestamp_dir_name(at()), "2026-10-19T14-03-07");
    }

    #[test]
    fn output_dir_with_and_without_timestamp() {
        let mut c = RunConfig {
            output_dir: Some(PathBuf::from("/tmp/out")),
            ..Default::default()
        };
        assert_eq!(
            c.resolve_output_dir(at()).unwrap(),
            PathBuf::from("/tmp/out/2026-10-19T14-03-07")
        );

        c.timestamp_output = false;
        assert_eq!(c.resolve_output_dir(at()).unwrap(), PathBuf::from("/tmp/out"));
    }

    #[test]
    fn default_output_dir_is_under_cwd() {
        let c = RunConfig {
            timestamp_output: false,
            ..Default::default()
        };
        let expected = std::env::current_dir().unwrap().join("outputs").join("testing");
        assert_eq!(c.resolve_output_dir(at()).unwrap(), expected);
    }

    #[test]
    fn load_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dirparity.toml");
        std::fs::write(
            &path,
            r#"
from_dir = "gold"
skip_tree_comparison = true
ignore = []

[diff]
context_only = true
"#,
        )
        .unwrap();

        let c = RunConfig::from_toml_file(&path).unwrap();
        assert_eq!(c.from_dir, Some(PathBuf::from("gold")));
        assert!(c.to_dir.is_none());
        assert!(c.skip_tree_comparison);
        assert!(c.timestamp_output);
        assert!(c.ignore.is_empty());
        assert!(c.diff.context_only);
        assert_eq!(c.diff.context_lines, 5);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "jobs = \"many\"").unwrap();

        let result = RunConfig::from_toml_file(&path);
        assert!(matches!(result, Err(RunError::ConfigParse { .. })));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let result = RunConfig::from_toml_file(Path::new("/nonexistent/dirparity.toml"));
        assert!(matches!(result, Err(RunError::ConfigRead { .. })));
    }
}
