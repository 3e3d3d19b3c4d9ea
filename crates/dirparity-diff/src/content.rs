//! Byte-for-byte file equality.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::error::{DiffError, DiffResult};

const CHUNK_SIZE: usize = 8 * 1024;

/// Returns `true` iff both files have exactly the same bytes.
///
/// Sizes are checked first; modification times are never consulted, so two
/// files with equal size and mtime but different content compare unequal.
pub fn files_are_identical(from: &Path, to: &Path) -> DiffResult<bool> {
    let from_meta = regular_file_metadata(from)?;
    let to_meta = regular_file_metadata(to)?;
    if from_meta.len() != to_meta.len() {
        return Ok(false);
    }

    let mut left = open(from)?;
    let mut right = open(to)?;
    let mut left_buf = vec![0u8; CHUNK_SIZE];
    let mut right_buf = vec![0u8; CHUNK_SIZE];

    loop {
        let n_left = fill(&mut left, &mut left_buf).map_err(|e| DiffError::io(from, e))?;
        let n_right = fill(&mut right, &mut right_buf).map_err(|e| DiffError::io(to, e))?;
        if n_left != n_right || left_buf[..n_left] != right_buf[..n_right] {
            return Ok(false);
        }
        if n_left == 0 {
            return Ok(true);
        }
    }
}

fn regular_file_metadata(path: &Path) -> DiffResult<std::fs::Metadata> {
    let meta = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DiffError::PathNotFound(path.to_path_buf()),
        _ => DiffError::io(path, e),
    })?;
    if meta.is_dir() {
        return Err(DiffError::NotAFile(path.to_path_buf()));
    }
    Ok(meta)
}

fn open(path: &Path) -> DiffResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| DiffError::io(path, e))
}

/// Read until `buf` is full or EOF; returns the number of bytes read.
fn fill(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn pair(left: &[u8], right: &[u8]) -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        fs::write(&a, left).unwrap();
        fs::write(&b, right).unwrap();
        (dir, a, b)
    }

    #[test]
    fn identical_content_is_identical() {
        let (_dir, a, b) = pair(b"hello\n", b"hello\n");
        assert!(files_are_identical(&a, &b).unwrap());
    }

    #[test]
    fn different_sizes_differ() {
        let (_dir, a, b) = pair(b"hello\n", b"hello world\n");
        assert!(!files_are_identical(&a, &b).unwrap());
    }

    #[test]
    fn same_size_different_bytes_differ() {
        let (_dir, a, b) = pair(b"abcd", b"abce");
        assert!(!files_are_identical(&a, &b).unwrap());
    }

    #[test]
    fn difference_past_first_chunk_is_detected() {
        let left = vec![7u8; CHUNK_SIZE * 3];
        let mut right = left.clone();
        right[CHUNK_SIZE * 2 + 17] = 8;
        let (_dir, a, b) = pair(&left, &right);
        assert!(!files_are_identical(&a, &b).unwrap());
    }

    #[test]
    fn empty_files_are_identical() {
        let (_dir, a, b) = pair(b"", b"");
        assert!(files_are_identical(&a, &b).unwrap());
    }

    #[test]
    fn binary_content_is_compared_too() {
        let (_dir, a, b) = pair(&[0, 0xFF, 0xFE], &[0, 0xFF, 0xFE]);
        assert!(files_are_identical(&a, &b).unwrap());
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, b"x").unwrap();
        let result = files_are_identical(dir.path(), &file);
        assert!(matches!(result, Err(DiffError::NotAFile(_))));
    }

    #[test]
    fn missing_file_is_path_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, b"x").unwrap();
        let result = files_are_identical(&file, &dir.path().join("missing"));
        assert!(matches!(result, Err(DiffError::PathNotFound(_))));
    }
}
