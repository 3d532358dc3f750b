//! Review comments keyed by display row index.

use serde::{Deserialize, Serialize};

use super::row::DisplayRow;

/// A reviewer comment on one row or an inclusive range of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Comment {
    /// First row the comment applies to.
    pub row: usize,
    /// Last row (inclusive) for multi-row selections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_row: Option<usize>,
    /// Comment body.
    pub text: String,
}

impl Comment {
    /// Last row covered by this comment.
    pub fn last_row(&self) -> usize {
        self.end_row.unwrap_or(self.row)
    }
}

/// Comments collected for a diff, optionally tagged with the diff fingerprint.
///
/// Unknown keys are rejected and `comments` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommentSet {
    /// SHA-256 of the diff text the comments were written against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
    pub comments: Vec<Comment>,
}

/// On-disk shapes accepted for a comment file.
#[derive(Deserialize)]
#[serde(untagged)]
enum CommentFile {
    Set(CommentSet),
    List(Vec<Comment>),
}

impl CommentSet {
    /// Parse a comment file: either `{"fingerprint": .., "comments": [..]}`
    /// or a bare array of comments.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let file: CommentFile = serde_json::from_str(content)?;
        Ok(match file {
            CommentFile::Set(set) => set,
            CommentFile::List(comments) => CommentSet {
                fingerprint: None,
                comments,
            },
        })
    }
}

/// A comment resolved against the rows it covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchoredComment {
    /// Path of the file owning the first row.
    pub file: String,
    pub file_index: usize,
    pub row: usize,
    pub end_row: usize,
    pub text: String,
    /// The rows quoted by this comment, in order.
    pub rows: Vec<DisplayRow>,
}
