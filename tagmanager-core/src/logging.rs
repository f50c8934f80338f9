//! Tracing subscriber setup
//!
//! The filter comes from `RUST_LOG` when set, otherwise from
//! [`LoggingSettings::filter`].

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Installs the global `fmt` subscriber
///
/// Returns `false` when logging is disabled in settings or a global
/// subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> bool {
    if !settings.enabled {
        return false;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| configured_filter(settings));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}

/// Builds the filter from settings, falling back to `info` when the
/// configured directive does not parse
fn configured_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_new(&settings.filter).unwrap_or_else(|_| EnvFilter::new("info"))
}
