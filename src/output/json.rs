//! JSON output renderer.
//!
//! Outputs `{"fingerprint": .., "files": [...], "rows": [...], "comments": [...]}`.

use crate::models::DiffFile;
use crate::output::{OutputRenderer, ReviewOutput};

/// JSON output renderer.
pub struct JsonRenderer;

fn file_summary(file: &DiffFile) -> serde_json::Value {
    serde_json::json!({
        "old_path": file.old_path,
        "new_path": file.new_path,
        "label": file.label(),
        "is_new": file.is_new,
        "is_deleted": file.is_deleted,
        "is_binary": file.is_binary,
        "hunks": file.hunks.len(),
        "line_count": file.line_count,
        "collapsed": file.collapsed,
        "added": file.added_lines(),
        "removed": file.removed_lines(),
    })
}

impl OutputRenderer for JsonRenderer {
    fn render(&self, output: &ReviewOutput<'_>) -> String {
        let files: Vec<_> = output.projection.files.iter().map(file_summary).collect();

        let value = serde_json::json!({
            "fingerprint": output.fingerprint,
            "files": files,
            "rows": output.projection.rows,
            "comments": output.comments,
        });

        let mut rendered =
            serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string());
        rendered.push('\n');
        rendered
    }
}
