//! redline: review unified diffs line by line (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod diff;
pub mod env;
pub mod logging;
pub mod models;
pub mod output;
pub mod review;
