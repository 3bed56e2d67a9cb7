pub mod build_info;
pub mod persistence;

use std::{env, sync::Once};

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "partner_ledger=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// A valid `RUST_LOG` replaces the default; otherwise the crate logs at `info`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = env_filter(env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
