//! Subscriber setup for the command-line tool

use crate::io::configuration::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count, `None` to defer to `RUST_LOG`
pub const fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("sockettile=info"),
        2 => Some("sockettile=debug"),
        _ => Some("sockettile=trace"),
    }
}

/// Build the log filter: `-v` flags win, then `RUST_LOG`, then the default
pub fn build_filter(verbose: u8) -> EnvFilter {
    verbosity_directive(verbose).map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        EnvFilter::new,
    )
}

/// Install the global fmt subscriber writing to stderr
///
/// Returns `false` if a subscriber was already installed.
pub fn init(verbose: u8) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .is_ok()
}
