//! Diff engine: loading diff text, unified diff parsing, and row projection.

pub mod file;
pub mod git;
pub mod parser;
pub mod project;

use std::path::Path;

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::InputMode;

pub use parser::parse_unified_diff;
pub use project::{project, project_with_threshold};

/// Errors from the diff engine.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("git command failed: {0}")]
    GitError(String),

    #[error("failed to read diff: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("path not found: {0}")]
    PathNotFound(String),
}

/// Read a unified diff from stdin.
pub async fn read_diff_stdin() -> Result<String, DiffError> {
    use tokio::io::AsyncReadExt;
    let mut buf = Vec::new();
    tokio::io::stdin()
        .read_to_end(&mut buf)
        .await
        .map_err(DiffError::FileReadError)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Load raw diff text from the given input mode.
pub async fn load_diff(input: &InputMode, repo_root: &Path) -> Result<String, DiffError> {
    let text = match input {
        InputMode::DiffFile(path) => file::read_diff_file(path).await?,
        InputMode::Stdin => read_diff_stdin().await?,
        InputMode::GitBase(refs) => git::git_diff(repo_root, refs).await?,
        InputMode::WorkingTree => git::git_diff(repo_root, "HEAD").await?,
    };
    tracing::debug!(bytes = text.len(), ?input, "loaded diff text");
    Ok(text)
}

/// Lowercase hex SHA-256 of the diff text.
///
/// Comments are keyed by row index, so a comment file is only valid for
/// the exact diff text it was written against.
pub fn fingerprint(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}
