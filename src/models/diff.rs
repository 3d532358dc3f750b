//! Diff-related types: file diffs, hunks, and diff lines.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of a line in a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineType {
    /// Line is unchanged (context).
    Context,
    /// Line exists only in the new version (added).
    Added,
    /// Line exists only in the old version (removed).
    Removed,
}

impl DiffLineType {
    /// The unified-diff marker character for this line type.
    pub fn marker(self) -> char {
        match self {
            DiffLineType::Context => ' ',
            DiffLineType::Added => '+',
            DiffLineType::Removed => '-',
        }
    }
}

impl fmt::Display for DiffLineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffLineType::Context => write!(f, "context"),
            DiffLineType::Added => write!(f, "added"),
            DiffLineType::Removed => write!(f, "removed"),
        }
    }
}

/// A single line in a diff hunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// The type of change.
    pub line_type: DiffLineType,
    /// The content of the line (without the leading +/-/space).
    pub content: String,
    /// 1-based ordinal within the owning file, shared by all line types.
    ///
    /// This is a display counter, not a line number in either version
    /// of the file.
    pub line_number: u32,
}

/// A contiguous hunk within a file diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hunk {
    /// Starting line in the old file.
    pub old_start: u64,
    /// Starting line in the new file.
    pub new_start: u64,
    /// Text after the closing `@@`, kept verbatim (usually starts with a space).
    pub header_context: String,
    /// The lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Rebuild the header shown for this hunk.
    ///
    /// Range lengths are not stored, so `@@ -10,5 +12,7 @@ f()` comes
    /// back as `@@ -10 +12 @@ f()`.
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@{}",
            self.old_start, self.new_start, self.header_context
        )
    }
}

/// A diff for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffFile {
    /// Path on the `a/` side of the `diff --git` header (empty if unparseable).
    pub old_path: String,
    /// Path on the `b/` side of the `diff --git` header (empty if unparseable).
    pub new_path: String,
    /// Whether this is a new file.
    pub is_new: bool,
    /// Whether this file was deleted.
    pub is_deleted: bool,
    /// Whether this is a binary file.
    pub is_binary: bool,
    /// The hunks in this diff.
    pub hunks: Vec<Hunk>,
    /// Total lines across all hunks (0 for binary files). Filled in by projection.
    pub line_count: usize,
    /// Whether the file is too long to show expanded. Filled in by projection.
    pub collapsed: bool,
}

impl DiffFile {
    /// Create an empty file diff for the given paths.
    pub fn new(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self {
            old_path: old_path.into(),
            new_path: new_path.into(),
            is_new: false,
            is_deleted: false,
            is_binary: false,
            hunks: Vec::new(),
            line_count: 0,
            collapsed: false,
        }
    }

    /// Returns `new_path`, falling back to `old_path` when it is empty.
    pub fn path(&self) -> &str {
        if self.new_path.is_empty() {
            &self.old_path
        } else {
            &self.new_path
        }
    }

    /// Path plus ` (new)`, ` (deleted)` and ` (binary)` suffixes, in that order.
    pub fn label(&self) -> String {
        let mut label = self.path().to_string();
        if self.is_new {
            label.push_str(" (new)");
        }
        if self.is_deleted {
            label.push_str(" (deleted)");
        }
        if self.is_binary {
            label.push_str(" (binary)");
        }
        label
    }

    /// Number of lines across all hunks; binary files always count zero.
    pub fn total_lines(&self) -> usize {
        if self.is_binary {
            return 0;
        }
        self.hunks.iter().map(|h| h.lines.len()).sum()
    }

    /// Returns the total number of added lines across all hunks.
    pub fn added_lines(&self) -> usize {
        self.count_lines(DiffLineType::Added)
    }

    /// Returns the total number of removed lines across all hunks.
    pub fn removed_lines(&self) -> usize {
        self.count_lines(DiffLineType::Removed)
    }

    fn count_lines(&self, line_type: DiffLineType) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.line_type == line_type)
            .count()
    }
}
