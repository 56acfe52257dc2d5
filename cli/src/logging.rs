//! # Structured Logging
//!
//! Initializes the `tracing` subscriber with environment-based filtering via
//! `RUST_LOG`. All log output goes to stderr: stdout is reserved for command
//! results (operation ids, keys, JSON envelopes) so they can be piped.
//!
//! Secret key material is never logged anywhere in this binary; the signer
//! library enforces the same rule.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber. Call exactly once, early in
/// `main()`.
///
/// `default_directives` applies when `RUST_LOG` is unset, e.g.
/// `"meridian_cli=info,meridian_signer=info"`.
pub fn init_logging(default_directives: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();
}
