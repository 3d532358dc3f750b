//! Unified diff format parser.
//!
//! Turns the output of `git diff` into `Vec<DiffFile>`. The parser is a
//! small state machine over lines and never fails: anything it does not
//! recognise is dropped and parsing continues.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::diff::{DiffFile, DiffLine, DiffLineType, Hunk};

static FILE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^diff --git a/(.+?) b/(.+)").expect("valid file header regex"));

static HUNK_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@@ -(\d+)(,\d+)? \+(\d+)(,\d+)? @@(.*)").expect("valid hunk header regex")
});

/// Where the parser is relative to the file/hunk structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first `diff --git` line.
    NoFile,
    /// Inside a file's extended headers, no hunk yet.
    InFile,
    /// Inside a hunk body.
    InHunk,
}

/// How a single input line is classified.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    NewFile,
    DeletedFile,
    Binary,
    Metadata,
    HunkHeader(&'a str),
    Body(DiffLineType, &'a str),
    Other,
}

fn classify(line: &str) -> LineKind<'_> {
    if line.starts_with("new file mode") {
        LineKind::NewFile
    } else if line.starts_with("deleted file mode") {
        LineKind::DeletedFile
    } else if line.starts_with("Binary files") {
        LineKind::Binary
    } else if line.starts_with("---") || line.starts_with("+++") || line.starts_with("index ") {
        LineKind::Metadata
    } else if line.starts_with("@@") {
        LineKind::HunkHeader(line)
    } else if let Some(content) = line.strip_prefix('+') {
        LineKind::Body(DiffLineType::Added, content)
    } else if let Some(content) = line.strip_prefix('-') {
        LineKind::Body(DiffLineType::Removed, content)
    } else if let Some(content) = line.strip_prefix(' ') {
        LineKind::Body(DiffLineType::Context, content)
    } else if line.is_empty() {
        LineKind::Body(DiffLineType::Context, "")
    } else {
        LineKind::Other
    }
}

struct Parser {
    state: State,
    files: Vec<DiffFile>,
    current: Option<DiffFile>,
    line_counter: u32,
}

impl Parser {
    fn new() -> Self {
        Self {
            state: State::NoFile,
            files: Vec::new(),
            current: None,
            line_counter: 0,
        }
    }

    fn feed(&mut self, line: &str) {
        if line.starts_with("diff --git") {
            self.open_file(line);
            return;
        }

        let Some(file) = self.current.as_mut() else {
            return;
        };

        match classify(line) {
            LineKind::NewFile => file.is_new = true,
            LineKind::DeletedFile => file.is_deleted = true,
            LineKind::Binary => file.is_binary = true,
            LineKind::Metadata => {}
            LineKind::HunkHeader(header) => match parse_hunk_header(header) {
                Some(hunk) => {
                    file.hunks.push(hunk);
                    self.state = State::InHunk;
                }
                None => tracing::trace!(line = header, "dropping malformed hunk header"),
            },
            LineKind::Body(line_type, content) => {
                if self.state != State::InHunk {
                    return;
                }
                if let Some(hunk) = file.hunks.last_mut() {
                    self.line_counter += 1;
                    hunk.lines.push(DiffLine {
                        line_type,
                        content: content.to_string(),
                        line_number: self.line_counter,
                    });
                }
            }
            LineKind::Other => {
                if self.state == State::InHunk {
                    tracing::trace!(line, "dropping unrecognised hunk line");
                }
            }
        }
    }

    fn open_file(&mut self, header: &str) {
        self.flush();
        let (old_path, new_path) = parse_file_header(header);
        self.current = Some(DiffFile::new(old_path, new_path));
        self.line_counter = 0;
        self.state = State::InFile;
    }

    fn flush(&mut self) {
        if let Some(file) = self.current.take() {
            self.files.push(file);
        }
    }

    fn finish(mut self) -> Vec<DiffFile> {
        self.flush();
        self.files
    }
}

/// Parse a unified diff string into a list of file diffs.
///
/// Text before the first `diff --git` line is ignored, so a plain
/// `diff -u` patch without git headers yields an empty list. A single
/// trailing newline terminates the last line rather than adding an
/// empty context line.
pub fn parse_unified_diff(input: &str) -> Vec<DiffFile> {
    let mut parser = Parser::new();
    let body = input.strip_suffix('\n').unwrap_or(input);
    for line in body.split('\n') {
        parser.feed(line);
    }
    let files = parser.finish();
    tracing::debug!(files = files.len(), "parsed unified diff");
    files
}

/// Extract old/new paths from a `diff --git a/<old> b/<new>` line.
///
/// Returns empty strings when the header does not match.
fn parse_file_header(line: &str) -> (String, String) {
    match FILE_HEADER.captures(line) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (String::new(), String::new()),
    }
}

/// Parse a `@@ -old_start[,len] +new_start[,len] @@[context]` line.
///
/// Range lengths are accepted but not kept. Starts too large for a `u64`
/// saturate, so any header matching the pattern opens a hunk.
fn parse_hunk_header(line: &str) -> Option<Hunk> {
    let caps = HUNK_HEADER.captures(line)?;
    Some(Hunk {
        old_start: parse_start(&caps[1]),
        new_start: parse_start(&caps[3]),
        header_context: caps.get(5).map_or_else(String::new, |m| m.as_str().to_string()),
        lines: Vec::new(),
    })
}

/// The capture is all digits, so the only parse failure is overflow.
fn parse_start(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}
