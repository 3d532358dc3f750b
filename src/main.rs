//! redline: review unified diffs line by line.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use redline::config;
use redline::constants;
use redline::diff;
use redline::env;
use redline::logging;
use redline::models;
use redline::output;
use redline::review;

use std::io::Write;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use cli::args::{Cli, Command, CommentsArgs, InputArgs, ShowArgs};
use config::Config;
use env::Env;
use models::Projection;
use output::{OutputFormat, ReviewOutput};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Env::real();
    logging::init(&env, cli.verbose);

    match cli.command {
        Command::Show(args) => run_show(args, &env).await,
        Command::Comments(args) => run_comments(args, &env).await,
        Command::Version => run_version(),
    }
}

/// Print version information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!("{} {}", constants::APP_NAME.bold(), constants::VERSION.green().bold());
    Ok(())
}

/// A diff loaded, parsed and projected, with the config that shaped it.
struct LoadedDiff {
    config: Config,
    projection: Projection,
    fingerprint: String,
}

/// Resolve the repo, load config, then read, parse and project the diff.
async fn load(input: &InputArgs, env: &Env) -> Result<LoadedDiff> {
    let input_mode = input.validate_input().map_err(|e| anyhow!(e))?;

    let base_dir = std::fs::canonicalize(&input.path)
        .with_context(|| format!("--path directory not found: {}", input.path.display()))?;
    let repo_root = match diff::git::find_repo_root(&base_dir).await {
        Ok(root) => PathBuf::from(root),
        Err(e) => {
            tracing::debug!(error = %e, "not inside a git repository, using --path as root");
            base_dir
        }
    };

    let config = Config::load(Some(&repo_root), env).context("failed to load configuration")?;

    let text = diff::load_diff(&input_mode, &repo_root)
        .await
        .context("failed to load diff")?;
    let fingerprint = diff::fingerprint(&text);
    let projection = diff::project_with_threshold(
        diff::parse_unified_diff(&text),
        config.display.collapse_threshold,
    );
    tracing::info!(
        files = projection.files.len(),
        rows = projection.rows.len(),
        %fingerprint,
        "diff ready"
    );

    Ok(LoadedDiff {
        config,
        projection,
        fingerprint,
    })
}

/// Render the rows of the diff.
async fn run_show(args: ShowArgs, env: &Env) -> Result<()> {
    let loaded = load(&args.input, env).await?;
    let format = args.format.unwrap_or(loaded.config.output.format);

    if loaded.projection.is_empty() {
        cli::print_notice("No changes.");
        if format != OutputFormat::Json {
            return Ok(());
        }
    }

    let output = ReviewOutput {
        projection: &loaded.projection,
        comments: &[],
        fingerprint: &loaded.fingerprint,
        expand: args.expand || loaded.config.display.expand,
    };
    emit(&format.render(&output))
}

/// Anchor a comment file to the diff and print the collected comments.
async fn run_comments(args: CommentsArgs, env: &Env) -> Result<()> {
    let loaded = load(&args.input, env).await?;
    let format = args.format.unwrap_or(loaded.config.output.format);

    let set = review::load_comments(&args.file)
        .await
        .context("failed to load comments")?;
    review::check_fingerprint(&set, &loaded.fingerprint, args.strict)?;

    let anchored = review::anchor_comments(&loaded.projection, &set.comments)
        .context("failed to anchor comments")?;
    tracing::info!(comments = anchored.len(), "anchored comments");

    if loaded.projection.is_empty() {
        cli::print_notice("No changes.");
    }

    let output = ReviewOutput {
        projection: &loaded.projection,
        comments: &anchored,
        fingerprint: &loaded.fingerprint,
        expand: args.expand || loaded.config.display.expand,
    };
    emit(&format.render(&output))
}

/// Write rendered output to stdout.
fn emit(rendered: &str) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(rendered.as_bytes())
        .and_then(|()| handle.flush())
        .context("failed to write output")
}
