//! Markdown renderer for collected comments.
//!
//! One section per commented file, each comment quoting its rows as a
//! `diff` code block. Suitable for pasting into a PR or an agent prompt.

use indexmap::IndexMap;

use crate::models::{AnchoredComment, RowKind};
use crate::output::{OutputRenderer, ReviewOutput};

/// Markdown output renderer.
pub struct MarkdownRenderer;

impl OutputRenderer for MarkdownRenderer {
    fn render(&self, output: &ReviewOutput<'_>) -> String {
        if output.comments.is_empty() {
            return "No comments.\n".to_string();
        }

        // Files appear in row order; comments are already sorted.
        let mut by_file: IndexMap<usize, Vec<&AnchoredComment>> = IndexMap::new();
        for comment in output.comments {
            by_file.entry(comment.file_index).or_default().push(comment);
        }
        by_file.sort_keys();

        let mut md = String::new();
        for (file_index, comments) in &by_file {
            let heading = output
                .projection
                .files
                .get(*file_index)
                .map(|f| f.label())
                .unwrap_or_default();
            md.push_str(&format!("## {heading}\n\n"));

            for comment in comments {
                md.push_str(&quote_rows(comment));
                for line in comment.text.lines() {
                    md.push_str(&format!("> {line}\n"));
                }
                md.push('\n');
            }
        }

        md
    }
}

fn quote_rows(comment: &AnchoredComment) -> String {
    let mut body = String::new();
    for row in &comment.rows {
        match &row.kind {
            RowKind::File { label, .. } => body.push_str(&format!("# {label}\n")),
            RowKind::Hunk { header } => body.push_str(&format!("{header}\n")),
            RowKind::Line { line_type, content } => {
                body.push(line_type.marker());
                body.push_str(content);
                body.push('\n');
            }
        }
    }
    let fence = "`".repeat(longest_backtick_run(&body).max(2) + 1);
    format!("{fence}diff\n{body}{fence}\n\n")
}

/// Length of the longest run of consecutive backticks in `text`.
fn longest_backtick_run(text: &str) -> usize {
    text.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}
