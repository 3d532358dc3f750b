//! Terminal renderer: the diff as numbered rows, comments inline.
//!
//! The gutter shows each row's global index, which is what comment files
//! refer to.

use std::collections::HashSet;

use colored::Colorize;

use crate::models::{DiffLineType, DisplayRow, RowKind};
use crate::output::{OutputRenderer, ReviewOutput};

/// Terminal output renderer with colored rows.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render(&self, output: &ReviewOutput<'_>) -> String {
        let projection = output.projection;
        if projection.is_empty() {
            return format!("{}\n", "  No changes.".dimmed());
        }

        let width = projection.rows.len().saturating_sub(1).to_string().len();
        // Files with comments are always shown in full.
        let commented: HashSet<usize> = output
            .comments
            .iter()
            .flat_map(|c| c.rows.iter().map(|r| r.file_index))
            .collect();

        let mut rendered = String::new();

        for row in &projection.rows {
            let Some(file) = projection.file_for_row(row.row_index) else {
                continue;
            };
            let hidden = file.collapsed && !output.expand && !commented.contains(&row.file_index);

            if row.is_file() {
                if row.row_index > 0 {
                    rendered.push('\n');
                }
                rendered.push_str(&format!("{}\n", render_row(row, width)));
                if hidden {
                    rendered.push_str(&format!(
                        " {:>width$}   {}\n",
                        "",
                        format!("… {} lines collapsed (use --expand)", file.line_count).dimmed(),
                    ));
                }
            } else if !hidden {
                rendered.push_str(&format!("{}\n", render_row(row, width)));
            }

            for comment in output.comments.iter().filter(|c| c.end_row == row.row_index) {
                let range = if comment.row == comment.end_row {
                    format!("row {}", comment.row)
                } else {
                    format!("rows {}-{}", comment.row, comment.end_row)
                };
                for (i, text_line) in comment.text.lines().enumerate() {
                    let marker = if i == 0 { "→" } else { " " };
                    rendered.push_str(&format!(" {:>width$}   {} {}", "", marker.cyan(), text_line));
                    if i == 0 {
                        rendered.push_str(&format!("  {}", range.dimmed()));
                    }
                    rendered.push('\n');
                }
            }
        }

        let files = projection.files.len();
        rendered.push_str(&format!("\n{}\n", "───────────────────────────────────".dimmed()));
        rendered.push_str(&format!(
            " {} {}, {} rows, {} {}\n",
            files.to_string().bold(),
            if files == 1 { "file" } else { "files" },
            projection.rows.len(),
            output.comments.len(),
            if output.comments.len() == 1 { "comment" } else { "comments" },
        ));

        rendered
    }
}

fn render_row(row: &DisplayRow, width: usize) -> String {
    let gutter = format!("{:>width$} │", row.row_index).dimmed();
    match &row.kind {
        RowKind::File {
            label, line_count, ..
        } => format!(
            "{} {} {}",
            gutter,
            label.bold(),
            format!("· {line_count} lines").dimmed()
        ),
        RowKind::Hunk { header } => format!("{} {}", gutter, header.cyan()),
        RowKind::Line { line_type, content } => {
            let text = format!("{}{}", line_type.marker(), content);
            let text = match line_type {
                DiffLineType::Added => text.green(),
                DiffLineType::Removed => text.red(),
                DiffLineType::Context => text.normal(),
            };
            format!("{gutter} {text}")
        }
    }
}
