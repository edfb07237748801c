//! Tracing initialisation.
//!
//! `RUST_LOG` takes precedence when set. Otherwise verbosity follows the
//! loaded debug flag.

use tracing_subscriber::{EnvFilter, prelude::*};

use crate::config::Settings;
use crate::constants::LOG_TARGET;

/// Default filter directive for the given debug flag.
pub fn default_directive(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("{LOG_TARGET}={level}")
}

/// Install a stderr subscriber before settings exist, so loading itself
/// can be traced. Only `RUST_LOG` is honoured at this stage.
pub fn init_bootstrap() -> Option<tracing::subscriber::DefaultGuard> {
    let filter = EnvFilter::try_from_default_env().ok()?;
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true),
    );
    Some(tracing::subscriber::set_default(subscriber))
}

/// Install the global subscriber for the rest of the process.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(settings.debug())));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init();
}
