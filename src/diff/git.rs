//! Git CLI wrapper for producing diffs.
//!
//! Shells out to `git` via `tokio::process::Command`.

use std::path::Path;

use super::DiffError;

/// Run `git diff <refs>` and return the unified diff output.
///
/// `refs` is split on whitespace, so both `main..feature` and
/// `HEAD~2 HEAD` work. Prefixes are forced to `a/` and `b/` so the
/// file header parses regardless of `diff.mnemonicPrefix`. Refs always
/// follow `--end-of-options` and are never read as flags.
pub async fn git_diff(repo_root: &Path, refs: &str) -> Result<String, DiffError> {
    let mut args = vec![
        "diff",
        "--no-color",
        "--src-prefix=a/",
        "--dst-prefix=b/",
        "--end-of-options",
    ];
    args.extend(refs.split_whitespace());
    tracing::debug!(?args, root = %repo_root.display(), "running git");

    let output = tokio::process::Command::new("git")
        .args(&args)
        .current_dir(repo_root)
        .output()
        .await
        .map_err(|e| DiffError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DiffError::GitError(format!(
            "git diff failed (exit {}): {}",
            output.status,
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Find the root of the git repository containing `start_dir`.
pub async fn find_repo_root(start_dir: &Path) -> Result<String, DiffError> {
    let output = tokio::process::Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(start_dir)
        .output()
        .await
        .map_err(|e| DiffError::GitError(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DiffError::GitError(format!(
            "not a git repository: {stderr}"
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
