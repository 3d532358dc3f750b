//! Flattened display rows: the addressable projection of a parsed diff.

use serde::{Deserialize, Serialize};

use super::diff::{DiffFile, DiffLineType};

/// What a display row shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RowKind {
    /// File header row.
    File {
        /// Path with new/deleted/binary suffixes.
        label: String,
        line_count: usize,
        collapsed: bool,
    },
    /// Hunk header row, e.g. `@@ -10 +12 @@ fn main()`.
    Hunk { header: String },
    /// A context, added or removed line.
    Line {
        line_type: DiffLineType,
        content: String,
    },
}

/// A single row in the review surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    /// Global, contiguous, 0-based index. Comments are keyed by this.
    pub row_index: usize,
    /// Index of the owning file in [`Projection::files`].
    pub file_index: usize,
    #[serde(flatten)]
    pub kind: RowKind,
}

impl DisplayRow {
    /// The text shown for this row: label, hunk header, or line content.
    pub fn text(&self) -> &str {
        match &self.kind {
            RowKind::File { label, .. } => label,
            RowKind::Hunk { header } => header,
            RowKind::Line { content, .. } => content,
        }
    }

    /// Returns `true` for file header rows.
    pub fn is_file(&self) -> bool {
        matches!(self.kind, RowKind::File { .. })
    }
}

/// Sorted files plus their flattened rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub rows: Vec<DisplayRow>,
    pub files: Vec<DiffFile>,
}

impl Projection {
    /// Returns `true` when the diff had no files ("no changes").
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Look up a row by its global index.
    pub fn row(&self, row_index: usize) -> Option<&DisplayRow> {
        self.rows.get(row_index)
    }

    /// The file that owns the given row.
    pub fn file_for_row(&self, row_index: usize) -> Option<&DiffFile> {
        self.row(row_index).and_then(|r| self.files.get(r.file_index))
    }
}
