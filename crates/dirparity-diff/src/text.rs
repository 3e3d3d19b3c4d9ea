//! Loading file content as lines of text.

use std::path::{Path, PathBuf};

use crate::error::{DiffError, DiffResult};
use crate::label::descriptive_label;

/// Outcome of decoding raw bytes as UTF-8 text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextDecodeResult {
    /// Valid UTF-8, split into lines without their terminators.
    Decoded(Vec<String>),
    /// Not valid UTF-8; treated as a binary file.
    NotText,
}

/// Decode `bytes` as UTF-8 and split into lines with [`split_lines`].
pub fn decode_lines(bytes: &[u8]) -> TextDecodeResult {
    match std::str::from_utf8(bytes) {
        Ok(text) => TextDecodeResult::Decoded(split_lines(text).map(str::to_owned).collect()),
        Err(_) => TextDecodeResult::NotText,
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split `text` on every Unicode line boundary, dropping the terminators.
///
/// Besides `\n` and `\r\n` this breaks on a bare `\r`, vertical tab, form
/// feed, the file/group/record separators, NEL, and the Unicode line and
/// paragraph separators. A trailing terminator does not start an empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((at, c)) => {
                let line = &rest[..at];
                let mut next = at + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                rest = &rest[next..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

/// A text file ready to be diffed.
#[derive(Clone, Debug)]
pub struct TextFile {
    pub path: PathBuf,
    /// Column header used in the rendered diff.
    pub label: String,
    pub lines: Vec<String>,
}

/// Read `path` as text, labelling it for display.
///
/// Directories fail with [`DiffError::NotAFile`], missing paths with
/// [`DiffError::PathNotFound`], undecodable content with
/// [`DiffError::BinaryFileNotSupported`].
pub fn load_text_file(path: &Path) -> DiffResult<TextFile> {
    if path.is_dir() {
        return Err(DiffError::NotAFile(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(DiffError::PathNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|e| DiffError::io(path, e))?;
    let lines = match decode_lines(&bytes) {
        TextDecodeResult::Decoded(lines) => lines,
        TextDecodeResult::NotText => {
            return Err(DiffError::BinaryFileNotSupported(path.to_path_buf()))
        }
    };

    Ok(TextFile {
        path: path.to_path_buf(),
        label: descriptive_label(path),
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn decode_splits_lines_without_terminators() {
        let result = decode_lines(b"one\r\ntwo\nthree");
        assert_eq!(
            result,
            TextDecodeResult::Decoded(vec!["one".into(), "two".into(), "three".into()])
        );
    }

    #[test]
    fn decode_splits_on_bare_carriage_returns() {
        let result = decode_lines(b"one\rtwo\rthree\r");
        assert_eq!(
            result,
            TextDecodeResult::Decoded(vec!["one".into(), "two".into(), "three".into()])
        );
    }

    #[test]
    fn split_lines_handles_every_separator() {
        let text = "a\x0bb\x0cc\x1cd\x1de\x1ef\u{85}g\u{2028}h\u{2029}i";
        let lines: Vec<&str> = split_lines(text).collect();
        assert_eq!(lines, vec!["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
    }

    #[test]
    fn split_lines_keeps_blank_lines() {
        let lines: Vec<&str> = split_lines("a\n\n\r\nb\r\r\n").collect();
        assert_eq!(lines, vec!["a", "", "", "b", ""]);
    }

    #[test]
    fn decode_empty_input_has_no_lines() {
        assert_eq!(decode_lines(b""), TextDecodeResult::Decoded(Vec::new()));
    }

    #[test]
    fn decode_invalid_utf8_is_not_text() {
        assert_eq!(decode_lines(&[0x66, 0x6f, 0xFF, 0xFE]), TextDecodeResult::NotText);
    }

    #[test]
    fn load_text_file_labels_and_reads() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        let path = sub.join("a.txt");
        fs::write(&path, "hello\nworld\n").unwrap();

        let file = load_text_file(&path).unwrap();
        assert_eq!(file.label, "sub_a_txt");
        assert_eq!(file.lines, vec!["hello", "world"]);
    }

    #[test]
    fn load_binary_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0u8, 159, 146, 150]).unwrap();

        let result = load_text_file(&path);
        assert!(matches!(result, Err(DiffError::BinaryFileNotSupported(_))));
    }

    #[test]
    fn load_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_text_file(dir.path());
        assert!(matches!(result, Err(DiffError::NotAFile(_))));
    }
}
