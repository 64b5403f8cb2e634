//! Weather client error types.

use std::fmt;
use thiserror::Error;

/// Which endpoint a request went to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CurrentWeather,
    Forecast,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::CurrentWeather => write!(f, "Current weather"),
            Endpoint::Forecast => write!(f, "Forecast"),
        }
    }
}

#[derive(Error, Debug)]
pub enum WeatherError {
    /// The endpoint answered with a non-2xx status.
    #[error("{endpoint} API error: {status}")]
    Request { endpoint: Endpoint, status: u16 },

    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} response malformed: {reason}")]
    MalformedResponse { endpoint: Endpoint, reason: String },

    #[error("{endpoint} request cancelled")]
    Cancelled { endpoint: Endpoint },

    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    #[error("Invalid {endpoint} endpoint URL: {reason}")]
    InvalidEndpoint { endpoint: Endpoint, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Background weather task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl WeatherError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            WeatherError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Endpoint involved, if the error came from a request.
    pub fn endpoint(&self) -> Option<Endpoint> {
        match self {
            WeatherError::Request { endpoint, .. }
            | WeatherError::Transport { endpoint, .. }
            | WeatherError::MalformedResponse { endpoint, .. }
            | WeatherError::Cancelled { endpoint }
            | WeatherError::InvalidEndpoint { endpoint, .. } => Some(*endpoint),
            WeatherError::InvalidLocation(_) | WeatherError::Client(_) | WeatherError::Task(_) => {
                None
            }
        }
    }

    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::Request { status: 401, .. } => {
                "Weather API key is invalid or not yet active. Check settings."
            }
            WeatherError::Request { status: 404, .. } => "Location not found. Check and try again.",
            WeatherError::Request { status, .. } if *status >= 500 => {
                "Weather service unavailable. Please try again later."
            }
            WeatherError::Request { .. } => "Weather service error. Please try again.",
            WeatherError::Transport { source, .. } if source.is_timeout() => {
                "The weather request timed out. Please try again."
            }
            WeatherError::Transport { .. } => "Unable to connect. Check your internet connection.",
            WeatherError::MalformedResponse { .. } => {
                "Received unexpected weather data. Please try again."
            }
            WeatherError::Cancelled { .. } => "Request cancelled.",
            WeatherError::InvalidLocation(_) => "Location not recognised. Check and try again.",
            WeatherError::InvalidEndpoint { .. } | WeatherError::Client(_) => {
                "Weather service is misconfigured. Check settings."
            }
            WeatherError::Task(_) => "Something went wrong. Please try again.",
        }
    }
}
