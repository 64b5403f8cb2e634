pub mod config;
pub mod error;

pub use config::{Config, ConfigIssue, ForecastConfig, Locale, ValidationResult, WeatherConfig};
pub use error::ConfigError;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Initialize logging with the default filter.
pub fn init() -> Result<()> {
    init_with_filter(DEFAULT_LOG_FILTER)
}

/// Initialize logging, preferring `RUST_LOG` over `default_filter`.
///
/// Calling this more than once is harmless: the first installed subscriber wins.
pub fn init_with_filter(default_filter: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .with_context(|| format!("Invalid log filter: {default_filter}"))?,
    };

    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        tracing::debug!("Tracing subscriber already installed: {}", e);
        return Ok(());
    }

    tracing::info!("Pogoda core initialized");
    Ok(())
}
