//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout stays clean for rendered output. The filter
//! comes from `REDLINE_LOG` (`EnvFilter` syntax) when set, otherwise from
//! the number of `-v` flags.

use tracing_subscriber::EnvFilter;

use crate::constants::ENV_LOG;
use crate::env::Env;

/// Default filter directive for a given `-v` count.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter from the environment, falling back to verbosity.
pub fn build_filter(env: &Env, verbose: u8) -> EnvFilter {
    env.var(ENV_LOG)
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level_for_verbosity(verbose)))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(env: &Env, verbose: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(env, verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
