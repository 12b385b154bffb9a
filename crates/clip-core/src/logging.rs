//! Tracing subscriber setup for hosts embedding the interceptor

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

type InitResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Directive used when `RUST_LOG` is unset: clipboard crates log at `info`.
pub const DEFAULT_DIRECTIVE: &str = "warn,clip_core=info,clip_content=info";

/// Initialize a tracing subscriber with default configuration.
///
/// Uses the `RUST_LOG` environment variable to pick the log level, falling
/// back to [`DEFAULT_DIRECTIVE`]. Decline reasons are logged at debug.
pub fn init() -> InitResult {
    init_with_default(DEFAULT_DIRECTIVE)
}

/// Like [`init`], with a caller-chosen directive when `RUST_LOG` is unset.
pub fn init_with_default(directive: &str) -> InitResult {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(directive)?)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Route clipboard events through the test harness output at debug level.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_for_tests() {
    let Ok(filter) = env_filter("clip_core=debug,clip_content=debug") else {
        return;
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer().compact())
        .try_init();
}

fn env_filter(directive: &str) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(directive))
}
