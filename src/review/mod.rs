//! Comment anchoring: resolve row-keyed comments against a projected diff.
//!
//! Comments are written against global row indices. This module checks
//! them against the current projection and attaches the rows they quote,
//! so renderers never have to index into the row list themselves.

use std::path::Path;

use thiserror::Error;

use crate::models::{AnchoredComment, Comment, CommentSet, Projection};

/// Errors while loading or anchoring comments.
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("failed to read comment file {path}: {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse comment file {path}: {source}")]
    ParseFile {
        path: String,
        source: serde_json::Error,
    },

    #[error("comment on row {row} is out of range (diff has {total} rows)")]
    RowOutOfRange { row: usize, total: usize },

    #[error("comment range {row}..={end_row} ends before it starts")]
    InvertedRange { row: usize, end_row: usize },

    #[error("comment on row {row} has no text")]
    EmptyComment { row: usize },

    #[error("comments were written against a different diff (expected {expected}, found {found})")]
    StaleComments { expected: String, found: String },
}

/// Read a comment file from disk.
pub async fn load_comments(path: &Path) -> Result<CommentSet, ReviewError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ReviewError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
    CommentSet::from_json(&content).map_err(|source| ReviewError::ParseFile {
        path: path.display().to_string(),
        source,
    })
}

/// Compare the comment set's fingerprint with the current diff.
///
/// A set without a fingerprint is always accepted. A mismatch is an error
/// when `strict`, otherwise a warning.
pub fn check_fingerprint(set: &CommentSet, current: &str, strict: bool) -> Result<(), ReviewError> {
    match set.fingerprint.as_deref() {
        Some(found) if found != current => {
            if strict {
                return Err(ReviewError::StaleComments {
                    expected: current.to_string(),
                    found: found.to_string(),
                });
            }
            tracing::warn!(
                expected = current,
                found,
                "comment file fingerprint does not match the diff; anchors may point at the wrong rows"
            );
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Resolve each comment to the rows it covers.
///
/// The result is ordered by start row, then end row. Comments with the same
/// range keep their input order.
pub fn anchor_comments(
    projection: &Projection,
    comments: &[Comment],
) -> Result<Vec<AnchoredComment>, ReviewError> {
    let mut anchored = comments
        .iter()
        .map(|c| anchor_one(projection, c))
        .collect::<Result<Vec<_>, _>>()?;
    anchored.sort_by_key(|a| (a.row, a.end_row));
    Ok(anchored)
}

fn anchor_one(projection: &Projection, comment: &Comment) -> Result<AnchoredComment, ReviewError> {
    let row = comment.row;
    let end_row = comment.last_row();
    let total = projection.rows.len();

    if end_row < row {
        return Err(ReviewError::InvertedRange { row, end_row });
    }
    if end_row >= total {
        return Err(ReviewError::RowOutOfRange {
            row: end_row,
            total,
        });
    }
    if comment.text.trim().is_empty() {
        return Err(ReviewError::EmptyComment { row });
    }

    let first = projection
        .row(row)
        .ok_or(ReviewError::RowOutOfRange { row, total })?;
    let file = projection
        .file_for_row(row)
        .map(|f| f.path().to_string())
        .unwrap_or_default();

    Ok(AnchoredComment {
        file,
        file_index: first.file_index,
        row,
        end_row,
        text: comment.text.clone(),
        rows: projection.rows[row..=end_row].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{parse_unified_diff, project};
    use pretty_assertions::assert_eq;

    const TWO_FILES: &str = "\
diff --git a/a.rs b/a.rs
@@ -1,2 +1,2 @@ fn a()
-old
+new
diff --git a/b.rs b/b.rs
new file mode 100644
@@ -0,0 +1 @@
+hello
";

    fn projection() -> Projection {
        project(parse_unified_diff(TWO_FILES))
    }

    fn comment(row: usize, end_row: Option<usize>, text: &str) -> Comment {
        Comment {
            row,
            end_row,
            text: text.to_string(),
        }
    }

    #[test]
    fn anchors_single_row() {
        let anchored = anchor_comments(&projection(), &[comment(3, None, "nice")]).unwrap();
        assert_eq!(anchored.len(), 1);
        let a = &anchored[0];
        assert_eq!(a.file, "a.rs");
        assert_eq!(a.file_index, 0);
        assert_eq!((a.row, a.end_row), (3, 3));
        assert_eq!(a.rows.len(), 1);
        assert_eq!(a.rows[0].text(), "new");
    }

    #[test]
    fn anchors_range_across_files_by_first_row() {
        let anchored = anchor_comments(&projection(), &[comment(2, Some(6), "span")]).unwrap();
        let a = &anchored[0];
        assert_eq!(a.file, "a.rs");
        let texts: Vec<&str> = a.rows.iter().map(|r| r.text()).collect();
        assert_eq!(texts, vec!["old", "new", "b.rs (new)", "@@ -0 +1 @@", "hello"]);
    }

    #[test]
    fn sorted_by_start_then_end_and_stable() {
        let comments = [
            comment(5, Some(6), "late"),
            comment(1, Some(3), "wide"),
            comment(1, None, "first"),
            comment(1, None, "second"),
        ];
        let anchored = anchor_comments(&projection(), &comments).unwrap();
        let texts: Vec<&str> = anchored.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "wide", "late"]);
    }

    #[test]
    fn out_of_range_row_is_rejected() {
        let err = anchor_comments(&projection(), &[comment(7, None, "x")]).unwrap_err();
        assert!(matches!(err, ReviewError::RowOutOfRange { row: 7, total: 7 }));

        let err = anchor_comments(&projection(), &[comment(0, Some(99), "x")]).unwrap_err();
        assert!(matches!(err, ReviewError::RowOutOfRange { row: 99, .. }));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = anchor_comments(&projection(), &[comment(4, Some(2), "x")]).unwrap_err();
        assert!(matches!(err, ReviewError::InvertedRange { row: 4, end_row: 2 }));
    }

    #[test]
    fn blank_text_is_rejected() {
        let err = anchor_comments(&projection(), &[comment(0, None, "  \n")]).unwrap_err();
        assert!(matches!(err, ReviewError::EmptyComment { row: 0 }));
    }

    #[test]
    fn no_comments_on_empty_diff() {
        let empty = project(parse_unified_diff(""));
        assert!(anchor_comments(&empty, &[]).unwrap().is_empty());
        assert!(anchor_comments(&empty, &[comment(0, None, "x")]).is_err());
    }

    #[test]
    fn fingerprint_mismatch_strict_and_lenient() {
        let set = CommentSet {
            fingerprint: Some("aaa".into()),
            comments: vec![],
        };
        assert!(check_fingerprint(&set, "aaa", true).is_ok());
        assert!(check_fingerprint(&set, "bbb", false).is_ok());
        let err = check_fingerprint(&set, "bbb", true).unwrap_err();
        assert!(err.to_string().contains("different diff"));

        let unsigned = CommentSet::default();
        assert!(check_fingerprint(&unsigned, "bbb", true).is_ok());
    }

    #[tokio::test]
    async fn load_comments_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.json");
        std::fs::write(&path, r#"[{"row": 3, "text": "why?"}]"#).unwrap();

        let set = load_comments(&path).await.unwrap();
        assert_eq!(set.comments.len(), 1);
        assert!(set.fingerprint.is_none());
    }

    #[tokio::test]
    async fn load_comments_errors() {
        let err = load_comments(Path::new("/tmp/redline_missing_comments.json"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("read"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ nope").unwrap();
        let err = load_comments(&path).await.unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
