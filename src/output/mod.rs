//! Output renderers: terminal, JSON, Markdown.

pub mod json;
pub mod markdown;
pub mod terminal;

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::models::{AnchoredComment, Projection};

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Markdown,
}

impl OutputFormat {
    /// Render using the renderer for this format.
    pub fn render(&self, output: &ReviewOutput<'_>) -> String {
        match self {
            OutputFormat::Terminal => terminal::TerminalRenderer.render(output),
            OutputFormat::Json => json::JsonRenderer.render(output),
            OutputFormat::Markdown => markdown::MarkdownRenderer.render(output),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Terminal => write!(f, "terminal"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!(
                "unknown output format: '{other}'. Supported: terminal, json, markdown"
            )),
        }
    }
}

/// Everything a renderer needs for one run.
#[derive(Debug, Clone, Copy)]
pub struct ReviewOutput<'a> {
    pub projection: &'a Projection,
    /// Anchored comments, sorted by row. Empty for `show`.
    pub comments: &'a [AnchoredComment],
    /// Fingerprint of the diff text the rows were built from.
    pub fingerprint: &'a str,
    /// Show collapsed files in full.
    pub expand: bool,
}

impl<'a> ReviewOutput<'a> {
    /// Output for the rows alone, with no comments.
    pub fn rows(projection: &'a Projection, fingerprint: &'a str) -> Self {
        Self {
            projection,
            comments: &[],
            fingerprint,
            expand: false,
        }
    }
}

/// Trait for rendering a review to an output format.
pub trait OutputRenderer {
    /// Render the review to a string.
    fn render(&self, output: &ReviewOutput<'_>) -> String;
}
