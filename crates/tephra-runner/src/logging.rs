//! Tracing initialization.

use std::sync::Once;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `TEPHRA_LOG=tephra_geometry=debug`.
pub const LOG_ENV: &str = "TEPHRA_LOG";

/// Install the global subscriber.
///
/// Uses `TEPHRA_LOG` when set and valid, otherwise `tephra=info`, or
/// `tephra=debug` when `verbose`. Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose { "tephra=debug" } else { "tephra=info" };
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}
