//! Shared types used across all modules.
//!
//! This module defines the core data structures for parsed diffs, display
//! rows, and review comments. Other modules import from here rather than
//! reaching into each other's internals.

pub mod comment;
pub mod diff;
pub mod row;

use std::path::PathBuf;

pub use comment::{AnchoredComment, Comment, CommentSet};
pub use diff::{DiffFile, DiffLine, DiffLineType, Hunk};
pub use row::{DisplayRow, Projection, RowKind};

/// Where the diff text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Read a pre-computed unified diff from a file.
    DiffFile(PathBuf),
    /// Read a unified diff from stdin.
    Stdin,
    /// Run `git diff` with the given refs (e.g. `main`, `main..feature`).
    GitBase(String),
    /// Uncommitted changes: `git diff HEAD`.
    WorkingTree,
}
