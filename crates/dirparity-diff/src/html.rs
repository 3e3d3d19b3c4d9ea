//! Side-by-side HTML rendering of a line diff.
//!
//! Uses the `similar` crate (Myers diff algorithm) over the two line
//! sequences and lays the result out as a four-column table: line number and
//! text for each side. Inserted, deleted and changed lines carry the
//! `diff_add`, `diff_sub` and `diff_chg` classes.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use similar::{Algorithm, DiffOp, DiffTag, TextDiff};

use crate::error::DiffResult;
use crate::text::{load_text_file, TextFile};

/// Rendering options for an HTML diff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlDiffOptions {
    /// Collapse unchanged regions, keeping `context_lines` around changes.
    pub context_only: bool,
    /// Lines of context on each side of a change when `context_only` is set.
    pub context_lines: usize,
}

impl Default for HtmlDiffOptions {
    fn default() -> Self {
        Self {
            context_only: false,
            context_lines: 5,
        }
    }
}

/// Load both files and render their diff as an HTML document.
pub fn generate_html_diff(from: &Path, to: &Path, options: &HtmlDiffOptions) -> DiffResult<String> {
    let from = load_text_file(from)?;
    let to = load_text_file(to)?;
    Ok(render_html_diff(&from, &to, options))
}

/// Render already-loaded files. Pure; touches no filesystem state.
pub fn render_html_diff(from: &TextFile, to: &TextFile, options: &HtmlDiffOptions) -> String {
    let old: Vec<&str> = from.lines.iter().map(String::as_str).collect();
    let new: Vec<&str> = to.lines.iter().map(String::as_str).collect();

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(old.as_slice(), new.as_slice());

    let identical = diff.ops().iter().all(|op| op.tag() == DiffTag::Equal);
    let groups: Vec<Vec<DiffOp>> = if options.context_only {
        diff.grouped_ops(options.context_lines)
    } else {
        vec![diff.ops().to_vec()]
    };

    let blocks = groups
        .iter()
        .map(|ops| {
            let mut rows = Vec::new();
            for op in ops {
                push_rows(&mut rows, op, &old, &new);
            }
            rows
        })
        .collect();

    Page {
        from_label: &from.label,
        to_label: &to.label,
        blocks,
        identical,
        context_only: options.context_only,
    }
    .to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RowKind {
    Equal,
    Deleted,
    Inserted,
    Changed,
}

struct Row<'a> {
    left: Option<(usize, &'a str)>,
    right: Option<(usize, &'a str)>,
    kind: RowKind,
}

fn push_rows<'a>(rows: &mut Vec<Row<'a>>, op: &DiffOp, old: &[&'a str], new: &[&'a str]) {
    let (tag, old_range, new_range) = op.as_tag_tuple();
    match tag {
        DiffTag::Equal => {
            for (i, j) in old_range.zip(new_range) {
                rows.push(Row {
                    left: Some((i, old[i])),
                    right: Some((j, new[j])),
                    kind: RowKind::Equal,
                });
            }
        }
        DiffTag::Delete => {
            for i in old_range {
                rows.push(Row {
                    left: Some((i, old[i])),
                    right: None,
                    kind: RowKind::Deleted,
                });
            }
        }
        DiffTag::Insert => {
            for j in new_range {
                rows.push(Row {
                    left: None,
                    right: Some((j, new[j])),
                    kind: RowKind::Inserted,
                });
            }
        }
        DiffTag::Replace => {
            let height = old_range.len().max(new_range.len());
            for k in 0..height {
                let i = old_range.start + k;
                let j = new_range.start + k;
                let left = (i < old_range.end).then(|| (i, old[i]));
                let right = (j < new_range.end).then(|| (j, new[j]));
                let kind = match (left.is_some(), right.is_some()) {
                    (true, true) => RowKind::Changed,
                    (true, false) => RowKind::Deleted,
                    _ => RowKind::Inserted,
                };
                rows.push(Row { left, right, kind });
            }
        }
    }
}

const STYLE: &str = "\
table.diff { font-family: Courier, monospace; border: medium; border-collapse: collapse; }
.diff_header { background-color: #e0e0e0; text-align: right; padding: 0 4px; }
th.diff_header { text-align: center; }
td.diff_text { white-space: pre-wrap; padding: 0 4px; }
.diff_add { background-color: #aaffaa; }
.diff_chg { background-color: #ffff77; }
.diff_sub { background-color: #ffaaaa; }
tr.diff_sep td { text-align: center; color: #808080; }
table.legend { margin-top: 1em; font-family: sans-serif; font-size: small; }";

struct Page<'a> {
    from_label: &'a str,
    to_label: &'a str,
    blocks: Vec<Vec<Row<'a>>>,
    identical: bool,
    context_only: bool,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html>")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(
            f,
            "<title>{} vs {}</title>",
            Escaped(self.from_label),
            Escaped(self.to_label)
        )?;
        writeln!(f, "<style>\n{STYLE}\n</style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<table class=\"diff\">")?;
        writeln!(
            f,
            "<thead><tr><th class=\"diff_header\" colspan=\"2\">{}</th><th class=\"diff_header\" colspan=\"2\">{}</th></tr></thead>",
            Escaped(self.from_label),
            Escaped(self.to_label)
        )?;
        writeln!(f, "<tbody>")?;

        let total_rows: usize = self.blocks.iter().map(Vec::len).sum();
        if self.identical && self.context_only {
            writeln!(f, "<tr><td colspan=\"4\">No Differences Found</td></tr>")?;
        } else if total_rows == 0 {
            writeln!(f, "<tr><td colspan=\"4\">Empty File</td></tr>")?;
        } else {
            for (n, block) in self.blocks.iter().enumerate() {
                if n > 0 {
                    writeln!(f, "<tr class=\"diff_sep\"><td colspan=\"4\">&#8942;</td></tr>")?;
                }
                for row in block {
                    write_row(f, row)?;
                }
            }
        }

        writeln!(f, "</tbody>")?;
        writeln!(f, "</table>")?;
        writeln!(
            f,
            "<table class=\"legend\"><tr><th>Legend</th><td class=\"diff_add\">Added</td><td class=\"diff_chg\">Changed</td><td class=\"diff_sub\">Deleted</td></tr></table>"
        )?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &Row<'_>) -> fmt::Result {
    let (left_class, right_class) = match row.kind {
        RowKind::Equal => ("", ""),
        RowKind::Deleted => (" diff_sub", ""),
        RowKind::Inserted => ("", " diff_add"),
        RowKind::Changed => (" diff_chg", " diff_chg"),
    };
    write!(f, "<tr>")?;
    write_cells(f, row.left, left_class)?;
    write_cells(f, row.right, right_class)?;
    writeln!(f, "</tr>")
}

fn write_cells(f: &mut fmt::Formatter<'_>, side: Option<(usize, &str)>, class: &str) -> fmt::Result {
    match side {
        Some((index, text)) => write!(
            f,
            "<td class=\"diff_header\">{}</td><td class=\"diff_text{class}\">{}</td>",
            index + 1,
            Escaped(text)
        ),
        None => write!(f, "<td class=\"diff_header\"></td><td class=\"diff_text\"></td>"),
    }
}

/// HTML-escapes the wrapped text on display.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#x27;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}
