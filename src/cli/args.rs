//! Clap argument types and input validation.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use redline::models::InputMode;
use redline::output::OutputFormat;

/// Review unified diffs line by line and emit anchored comments.
#[derive(Parser, Debug)]
#[command(name = "redline", version = redline::constants::VERSION)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Overridden by REDLINE_LOG.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the diff as numbered rows.
    Show(ShowArgs),

    /// Anchor a comment file to the diff and print the result.
    Comments(CommentsArgs),

    /// Print version information.
    Version,
}

/// Where to read the diff from. With no flag, uncommitted changes
/// (`git diff HEAD`) are used.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the repository or working directory (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Pre-computed unified diff or patch file.
    #[arg(long)]
    pub diff_file: Option<PathBuf>,

    /// Read unified diff from stdin.
    #[arg(long, default_value_t = false)]
    pub diff_stdin: bool,

    /// Refs to pass to `git diff`, e.g. `main` or `main..feature`.
    #[arg(long)]
    pub diff_base: Option<String>,
}

/// Arguments for the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format (default from config, else terminal).
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Show collapsed files in full.
    #[arg(long, default_value_t = false)]
    pub expand: bool,
}

/// Arguments for the `comments` subcommand.
#[derive(Args, Debug)]
pub struct CommentsArgs {
    /// JSON comment file: `{"fingerprint": .., "comments": [..]}` or a bare array.
    pub file: PathBuf,

    #[command(flatten)]
    pub input: InputArgs,

    /// Output format (default from config, else terminal).
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Show collapsed files in full.
    #[arg(long, default_value_t = false)]
    pub expand: bool,

    /// Fail if the comment file was written against a different diff.
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

impl InputArgs {
    /// Validate that at most one input source is provided.
    pub fn validate_input(&self) -> Result<InputMode, String> {
        let sources = [
            self.diff_file.is_some(),
            self.diff_stdin,
            self.diff_base.is_some(),
        ];
        if sources.iter().filter(|&&x| x).count() > 1 {
            return Err(
                "only one input source allowed: --diff-file, --diff-stdin, or --diff-base"
                    .to_string(),
            );
        }

        Ok(if let Some(ref path) = self.diff_file {
            InputMode::DiffFile(path.clone())
        } else if self.diff_stdin {
            InputMode::Stdin
        } else if let Some(ref refs) = self.diff_base {
            InputMode::GitBase(refs.clone())
        } else {
            InputMode::WorkingTree
        })
    }
}
