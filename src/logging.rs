//! Tracing setup
//!
//! Logs go to stderr so command output and relay responses on stdout stay
//! machine-readable.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_DIRECTIVE: &str = "finance_tracker=warn";

/// Fallback filter for `--verbose` runs and the relay
pub const VERBOSE_DIRECTIVE: &str = "finance_tracker=info";

/// Install the global tracing subscriber once
///
/// `RUST_LOG` wins over `fallback` when it parses.
pub fn init(fallback: &str) {
    TRACING_INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

        // Another subscriber may already be installed (e.g. by an embedding app)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(DEFAULT_DIRECTIVE);
        init(VERBOSE_DIRECTIVE);
        tracing::info!("logging initialised twice without panicking");
    }
}
