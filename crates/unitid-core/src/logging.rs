//! Tracing subscriber bootstrap.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// ## Summary
/// Installs a global `fmt` subscriber filtered by `config.level`.
///
/// `RUST_LOG` takes precedence over the configured level when it is set.
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_not_set| EnvFilter::new(config.level.as_str()));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(level = %config.level, "Logging initialized");
    }

    installed
}
