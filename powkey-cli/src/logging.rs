//! Logging setup shared by both binaries.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Picks the filter directives: `--verbose` forces `debug`, otherwise
/// `RUST_LOG` if set, otherwise `warn`.
#[must_use]
pub fn filter_directives(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return "debug".to_string();
    }
    rust_log
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}

/// Installs the global subscriber. Logs go to stderr so stdout can carry
/// tokens and JSON.
pub fn init_logging(verbose: bool) {
    let directives = filter_directives(verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
