//! Tracing bootstrap for embedding processes and tests.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// The `VERACITY_LOG` environment variable takes precedence over
/// `default_filter`. Safe to call more than once; only the first call
/// installs a subscriber.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_env("VERACITY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
