//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`, so `--json` output on stdout
//! stays machine-readable. `RUST_LOG` overrides the `--verbose` flag.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn init(verbose: bool) {
    let default_filter = if verbose { "csvdash=debug" } else { "csvdash=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
