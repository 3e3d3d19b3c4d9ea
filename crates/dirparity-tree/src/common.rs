//! Enumeration of the regular files both roots share.

use tracing::debug;
use walkdir::WalkDir;

use crate::error::TreeResult;
use crate::root::{DirectoryRoot, RelativeEntry};

/// Every regular file under `from` whose relative path is also a regular
/// file under `to`, in walk order.
///
/// Files that exist on one side only are left to the tree comparison. The
/// walk is sorted by file name so the sequence is stable for a given
/// filesystem state.
pub fn common_files(from: &DirectoryRoot, to: &DirectoryRoot) -> TreeResult<Vec<RelativeEntry>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(from.path()).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(from.path()) else {
            continue;
        };
        if to.path().join(relative).is_file() {
            files.push(RelativeEntry::new(relative));
        }
    }

    debug!(count = files.len(), "enumerated common files");
    Ok(files)
}
