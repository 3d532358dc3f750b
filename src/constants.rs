//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and display defaults so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "redline";

/// Crate version, as reported by `redline version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.redline.toml` in repo root).
pub const CONFIG_FILENAME: &str = ".redline.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "redline";

/// Files with more diff lines than this start out collapsed.
pub const DEFAULT_COLLAPSE_THRESHOLD: usize = 50;

// ── Environment variable names ──────────────────────────────────────

pub const ENV_FORMAT: &str = "REDLINE_FORMAT";
pub const ENV_COLLAPSE_THRESHOLD: &str = "REDLINE_COLLAPSE_THRESHOLD";
pub const ENV_LOG: &str = "REDLINE_LOG";
