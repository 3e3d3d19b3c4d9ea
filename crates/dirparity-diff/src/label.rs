//! Display labels and artifact names for compared files.
//!
//! Two roots usually hold files with the same bare name, so each file is
//! labelled with the name of its enclosing directory as well.

use std::path::{Path, PathBuf};

/// `<enclosing directory stem>_<file name with '/' and '.' replaced by '_'>`.
///
/// `outputs/run1/data.json` becomes `run1_data_json`. Relative paths are made
/// absolute first so that a bare file name still picks up the current
/// directory as its parent.
pub fn descriptive_label(path: &Path) -> String {
    let name: String = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
        .chars()
        .map(|c| if c == '/' || c == '.' { '_' } else { c })
        .collect();

    let absolute = std::path::absolute(path).unwrap_or_else(|_| PathBuf::from(path));
    let parent = absolute
        .parent()
        .and_then(Path::file_stem)
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    format!("{parent}_{name}")
}

/// File name used when an artifact is written into a directory.
pub fn artifact_file_name(from: &Path, to: &Path) -> String {
    format!("{}_vs_{}.html", descriptive_label(from), descriptive_label(to))
}

/// Every component of a relative path, joined with `_`, dots replaced.
///
/// `a/x/f.txt` becomes `a_x_f_txt`. Used when the enclosing directory alone
/// does not tell two files apart.
pub fn relative_label(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().replace('.', "_"))
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn label_prefixes_parent_and_sanitizes_name() {
        assert_eq!(descriptive_label(Path::new("outputs/run1/data.json")), "run1_data_json");
    }

    #[test]
    fn label_replaces_every_dot() {
        assert_eq!(descriptive_label(Path::new("/tmp/sub/archive.tar.gz")), "sub_archive_tar_gz");
    }

    #[test]
    fn label_uses_stem_of_parent_directory() {
        assert_eq!(descriptive_label(Path::new("/data/v1.2/log.txt")), "v1_log_txt");
    }

    #[test]
    fn relative_bare_name_uses_current_directory() {
        let cwd = std::env::current_dir().unwrap();
        let parent = cwd.file_stem().unwrap().to_string_lossy().into_owned();
        assert_eq!(descriptive_label(Path::new("a.txt")), format!("{parent}_a_txt"));
    }

    #[test]
    fn artifact_name_joins_labels() {
        let name = artifact_file_name(Path::new("/from/sub/a.txt"), Path::new("/to/sub/a.txt"));
        assert_eq!(name, "sub_a_txt_vs_sub_a_txt.html");
    }

    #[test]
    fn relative_label_keeps_every_component() {
        assert_eq!(relative_label(Path::new("a/x/f.txt")), "a_x_f_txt");
        assert_eq!(relative_label(Path::new("b/x/f.txt")), "b_x_f_txt");
        assert_eq!(relative_label(Path::new("top.cfg")), "top_cfg");
    }

    proptest! {
        #[test]
        fn label_never_contains_dots(parent in "[a-z]{1,8}", name in "[a-z][a-z.]{0,11}") {
            let path = PathBuf::from("/root").join(&parent).join(&name);
            prop_assume!(path.file_name().is_some());
            let label = descriptive_label(&path);
            prop_assert!(!label.contains('.'));
            let expected_prefix = format!("{}_", parent);
            prop_assert!(label.starts_with(&expected_prefix));
        }
    }
}
