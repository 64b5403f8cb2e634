use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Default current-weather endpoint.
pub const DEFAULT_CURRENT_WEATHER_URL: &str =
    "https://functions.poehali.dev/6bade6fd-8fdf-4222-ba21-a1657070aefd";

/// Default forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str =
    "https://functions.poehali.dev/6f91929f-8c2a-44e3-8cf3-01237f74fcf2";

const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Query keys the weather client appends to every request.
const LOCATION_QUERY_KEYS: [&str; 3] = ["city", "lat", "lon"];

/// A problem with one config key, e.g. `forecast.max_days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of [`Config::validate`]. Errors block loading, warnings are logged.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigIssue>,
    pub warnings: Vec<ConfigIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any error or warning names `field`.
    pub fn flags(&self, field: &str) -> bool {
        self.errors
            .iter()
            .chain(&self.warnings)
            .any(|issue| issue.field == field)
    }

    /// Fail with every error joined into one message, or hand back the warnings.
    pub fn into_result(self) -> Result<Vec<ConfigIssue>, ConfigError> {
        if self.is_valid() {
            return Ok(self.warnings);
        }

        let summary = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Invalid(summary))
    }

    fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(ConfigIssue {
            field,
            message: message.into(),
        });
    }

    fn warn(&mut self, field: &'static str, message: impl Into<String>) {
        self.warnings.push(ConfigIssue {
            field,
            message: message.into(),
        });
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Weather endpoint settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Daily forecast settings
    #[serde(default)]
    pub forecast: ForecastConfig,
}

/// Language used for display labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Ru,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Current conditions endpoint
    pub current_weather_url: String,

    /// Multi-day forecast endpoint
    pub forecast_url: String,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Label language
    pub locale: Locale,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            current_weather_url: DEFAULT_CURRENT_WEATHER_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            request_timeout_secs: 10,
            locale: Locale::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Maximum number of daily summaries to produce
    pub max_days: usize,

    /// Offset of the location's calendar day from UTC, in minutes.
    /// Used when the forecast itself carries no timezone.
    pub utc_offset_minutes: i32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            max_days: 10,
            // Moscow time
            utc_offset_minutes: 180,
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save_to(&config_path)?;
            return Ok(config);
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged and returned; any validation error fails the load.
    pub fn load_validated() -> Result<(Self, Vec<ConfigIssue>), ConfigError> {
        let config = Self::load()?;
        let warnings = config.validate().into_result()?;

        for warning in &warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, warnings))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        check_endpoint(
            "weather.current_weather_url",
            &self.weather.current_weather_url,
            &mut result,
        );
        check_endpoint("weather.forecast_url", &self.weather.forecast_url, &mut result);

        if self.weather.request_timeout_secs == 0 {
            result.error(
                "weather.request_timeout_secs",
                "Request timeout must be greater than 0",
            );
        } else if self.weather.request_timeout_secs > 120 {
            result.warn(
                "weather.request_timeout_secs",
                "Request timeout is unusually long (>120s)",
            );
        }

        if self.forecast.max_days == 0 {
            result.warn("forecast.max_days", "Daily forecast disabled (0 days)");
        } else if self.forecast.max_days > 16 {
            result.warn(
                "forecast.max_days",
                "More days requested than any provider forecasts (>16)",
            );
        }

        if self.forecast.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            result.error(
                "forecast.utc_offset_minutes",
                format!(
                    "UTC offset must be within ±{} minutes, got {}",
                    MAX_UTC_OFFSET_MINUTES, self.forecast.utc_offset_minutes
                ),
            );
        }

        result
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;

        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path to the configuration file
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("pogoda").join("config.toml"))
    }
}

/// An endpoint must be an absolute http(s) URL the client can append a
/// location query to.
fn check_endpoint(field: &'static str, raw: &str, result: &mut ValidationResult) {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            result.error(field, format!("Invalid URL: {}", e));
            return;
        }
    };

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        result.error(
            field,
            format!("Endpoint must be an http or https URL, got: {}", raw),
        );
        return;
    }

    if let Some((key, _)) = url
        .query_pairs()
        .find(|(key, _)| LOCATION_QUERY_KEYS.contains(&&**key))
    {
        result.error(
            field,
            format!("Query parameter `{}` is set per request and must not be fixed", key),
        );
    }

    if url.fragment().is_some() {
        result.warn(field, "URL fragment is never sent and will be ignored");
    }

    let loopback = matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));
    if url.scheme() == "http" && !loopback {
        result.warn(field, "Endpoint is not using https");
    }
}
