//! Integration tests for parsing and row projection.
//!
//! These exercise the public `diff` API end to end: raw text in,
//! sorted files and globally indexed rows out.

use pretty_assertions::assert_eq;

use redline::diff::{parse_unified_diff, project, project_with_threshold};
use redline::models::{DiffLineType, Projection, RowKind};

const MIXED: &str = include_str!("fixtures/mixed.diff");

fn project_text(text: &str) -> Projection {
    project(parse_unified_diff(text))
}

/// rows == files + hunks of non-binary files + lines of non-binary files.
fn expected_rows(projection: &Projection) -> usize {
    projection
        .files
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

fn file_row_indices(projection: &Projection) -> Vec<(usize, bool)> {
    projection
        .rows
        .iter()
        .filter(|r| r.is_file())
        .map(|r| (r.row_index, projection.files[r.file_index].is_binary))
        .collect()
}

// ---------------------------------------------------------------------------
// invariants
// ---------------------------------------------------------------------------

#[test]
fn row_count_invariant_on_fixture() {
    let projection = project_text(MIXED);
    assert_eq!(projection.files.len(), 5);
    assert_eq!(projection.rows.len(), 20);
    assert_eq!(projection.rows.len(), expected_rows(&projection));
}

#[test]
fn row_indices_are_contiguous() {
    for text in [MIXED, "", "diff --git a/f b/f\n", "garbage\n+x\n"] {
        let projection = project_text(text);
        for (i, row) in projection.rows.iter().enumerate() {
            assert_eq!(row.row_index, i);
        }
    }
}

#[test]
fn fixture_sorted_binary_last_in_stable_order() {
    let projection = project_text(MIXED);
    let order: Vec<&str> = projection.files.iter().map(|f| f.path()).collect();
    assert_eq!(
        order,
        vec![
            "src/config.rs",
            "scripts/build.sh",
            "docs/old.md",
            "assets/logo.png",
            "fonts/a.woff",
        ]
    );
}

#[test]
fn binary_file_rows_come_after_all_text_file_rows() {
    let projection = project_text(MIXED);
    let files = file_row_indices(&projection);
    let last_text = files.iter().filter(|(_, bin)| !bin).map(|(i, _)| *i).max().unwrap();
    let first_binary = files.iter().filter(|(_, bin)| *bin).map(|(i, _)| *i).min().unwrap();
    assert!(first_binary > last_text);
    assert_eq!(files, vec![(0, false), (13, false), (14, false), (18, true), (19, true)]);
}

#[test]
fn projection_is_deterministic() {
    let first = project_text(MIXED);
    let second = project_text(MIXED);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first.rows).unwrap(),
        serde_json::to_string(&second.rows).unwrap()
    );
}

#[test]
fn every_row_points_at_an_existing_file() {
    let projection = project_text(MIXED);
    for row in &projection.rows {
        assert!(row.file_index < projection.files.len());
    }
    // Rows of one file are contiguous and files appear in sorted order.
    let indices: Vec<usize> = projection.rows.iter().map(|r| r.file_index).collect();
    let mut sorted = indices.clone();
    sorted.sort();
    assert_eq!(indices, sorted);
}

// ---------------------------------------------------------------------------
// fixture details
// ---------------------------------------------------------------------------

#[test]
fn fixture_labels_and_flags() {
    let projection = project_text(MIXED);
    let labels: Vec<&str> = projection
        .rows
        .iter()
        .filter(|r| r.is_file())
        .map(|r| r.text())
        .collect();
    assert_eq!(
        labels,
        vec![
            "src/config.rs",
            "scripts/build.sh",
            "docs/old.md (deleted)",
            "assets/logo.png (new) (binary)",
            "fonts/a.woff (binary)",
        ]
    );

    let config = &projection.files[0];
    assert_eq!(config.line_count, 10);
    assert_eq!(config.added_lines(), 3);
    assert_eq!(config.removed_lines(), 2);
    assert_eq!(projection.files[1].line_count, 0);
    assert_eq!(projection.files[3].line_count, 0);
}

#[test]
fn fixture_hunk_headers_are_reconstructed() {
    let projection = project_text(MIXED);
    let headers: Vec<&str> = projection
        .rows
        .iter()
        .filter(|r| matches!(r.kind, RowKind::Hunk { .. }))
        .map(|r| r.text())
        .collect();
    assert_eq!(
        headers,
        vec![
            "@@ -12 +12 @@ impl Config {",
            "@@ -40 +41 @@ impl Config {",
            "@@ -1 +0 @@",
        ]
    );
}

#[test]
fn fixture_line_numbers_run_across_hunks() {
    let projection = project_text(MIXED);
    let config = &projection.files[0];
    let numbers: Vec<u32> = config
        .hunks
        .iter()
        .flat_map(|h| &h.lines)
        .map(|l| l.line_number)
        .collect();
    assert_eq!(numbers, (1..=10).collect::<Vec<u32>>());
    // The blank context line inside the first hunk is kept with empty content.
    assert_eq!(config.hunks[0].lines[6].line_type, DiffLineType::Context);
    assert_eq!(config.hunks[0].lines[6].content, "");
}

// ---------------------------------------------------------------------------
// scenarios
// ---------------------------------------------------------------------------

#[test]
fn scenario_simple_single_file() {
    let text = "diff --git a/x.txt b/x.txt\n@@ -1,2 +1,2 @@\n-old\n+new\n context\n";
    let projection = project_text(text);
    assert_eq!(projection.rows.len(), 5);

    let expected = vec![
        RowKind::File {
            label: "x.txt".into(),
            line_count: 3,
            collapsed: false,
        },
        RowKind::Hunk {
            header: "@@ -1 +1 @@".into(),
        },
        RowKind::Line {
            line_type: DiffLineType::Removed,
            content: "old".into(),
        },
        RowKind::Line {
            line_type: DiffLineType::Added,
            content: "new".into(),
        },
        RowKind::Line {
            line_type: DiffLineType::Context,
            content: "context".into(),
        },
    ];
    let kinds: Vec<RowKind> = projection.rows.iter().map(|r| r.kind.clone()).collect();
    assert_eq!(kinds, expected);
}

#[test]
fn scenario_binary_first_in_text_rendered_last() {
    let text = "\
diff --git a/img.png b/img.png
Binary files a/img.png and b/img.png differ
diff --git a/x.txt b/x.txt
@@ -1 +1 @@
-a
+b
";
    let projection = project_text(text);
    let last = projection.rows.last().unwrap();
    assert_eq!(last.text(), "img.png (binary)");
    assert_eq!(projection.rows.iter().filter(|r| r.file_index == last.file_index).count(), 1);
}

#[test]
fn scenario_empty_input() {
    assert!(parse_unified_diff("").is_empty());
    let projection = project_text("");
    assert_eq!(projection, Projection::default());
}

#[test]
fn scenario_malformed_hunk_header_drops_body() {
    let text = "\
diff --git a/f.rs b/f.rs
@@ -1,2 +1,2
-old
+new
 same
@@ -8 +8 @@
+kept
";
    let projection = project_text(text);
    let file = &projection.files[0];
    assert_eq!(file.hunks.len(), 1);
    assert_eq!(file.hunks[0].old_start, 8);
    assert_eq!(file.hunks[0].lines.len(), 1);
    assert_eq!(file.hunks[0].lines[0].content, "kept");
    assert_eq!(file.hunks[0].lines[0].line_number, 1);
    assert_eq!(projection.rows.len(), 3);
}

#[test]
fn scenario_empty_new_file() {
    let text = "diff --git a/empty b/empty\nnew file mode 100644\nindex 0000000..e69de29\n";
    let projection = project_text(text);
    let file = &projection.files[0];
    assert!(file.is_new);
    assert_eq!(file.line_count, 0);
    assert!(!file.collapsed);
    assert_eq!(projection.rows.len(), 1);
}

#[test]
fn oversized_hunk_start_keeps_its_rows() {
    let text = "diff --git a/f b/f\n@@ -5000000000,2 +5000000000,2 @@\n+x\n";
    let projection = project_text(text);
    assert_eq!(projection.rows.len(), 3);
    assert_eq!(projection.rows[1].text(), "@@ -5000000000 +5000000000 @@");
}

#[test]
fn header_round_trip() {
    let text = "diff --git a/f b/f\n@@ -10,5 +12,7 @@ someFunc()\n";
    let projection = project_text(text);
    assert_eq!(projection.rows[1].text(), "@@ -10 +12 @@ someFunc()");
}

#[test]
fn threshold_changes_only_the_collapsed_flag() {
    let default = project_text(MIXED);
    let tight = project_with_threshold(parse_unified_diff(MIXED), 5);
    assert!(!default.files[0].collapsed);
    assert!(tight.files[0].collapsed);
    assert_eq!(default.rows.len(), tight.rows.len());
}
