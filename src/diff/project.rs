//! Flatten parsed file diffs into globally indexed display rows.

use crate::constants::DEFAULT_COLLAPSE_THRESHOLD;
use crate::models::diff::DiffFile;
use crate::models::row::{DisplayRow, Projection, RowKind};

/// Project files into rows using the default collapse threshold.
pub fn project(files: Vec<DiffFile>) -> Projection {
    project_with_threshold(files, DEFAULT_COLLAPSE_THRESHOLD)
}

/// Sort files binary-last, fill in line counts, and emit one row per file,
/// hunk and line with a contiguous `row_index`.
///
/// Binary files contribute only their file row. `collapsed` is a display
/// hint and never changes which rows are emitted.
pub fn project_with_threshold(mut files: Vec<DiffFile>, collapse_threshold: usize) -> Projection {
    // `sort_by_key` is stable, so equal binary-ness keeps input order.
    files.sort_by_key(|f| f.is_binary);

    for file in &mut files {
        file.line_count = file.total_lines();
        file.collapsed = file.line_count > collapse_threshold;
    }

    let mut rows = Vec::with_capacity(row_count(&files));
    for (file_index, file) in files.iter().enumerate() {
        rows.push(DisplayRow {
            row_index: rows.len(),
            file_index,
            kind: RowKind::File {
                label: file.label(),
                line_count: file.line_count,
                collapsed: file.collapsed,
            },
        });

        if file.is_binary {
            continue;
        }

        for hunk in &file.hunks {
            rows.push(DisplayRow {
                row_index: rows.len(),
                file_index,
                kind: RowKind::Hunk {
                    header: hunk.header(),
                },
            });
            for line in &hunk.lines {
                rows.push(DisplayRow {
                    row_index: rows.len(),
                    file_index,
                    kind: RowKind::Line {
                        line_type: line.line_type,
                        content: line.content.clone(),
                    },
                });
            }
        }
    }

    tracing::debug!(files = files.len(), rows = rows.len(), "projected diff rows");
    Projection { rows, files }
}

/// Number of rows a projection of `files` produces.
pub fn row_count(files: &[DiffFile]) -> usize {
    files
        .iter()
        .map(|f| {
            if f.is_binary {
                1
            } else {
                1 + f.hunks.len() + f.hunks.iter().map(|h| h.lines.len()).sum::<usize>()
            }
        })
        .sum()
}
