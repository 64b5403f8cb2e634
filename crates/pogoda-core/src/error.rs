//! Configuration error types.
//!
//! Each variant keeps the technical detail for logging and offers a
//! short `user_message()` for display.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("I/O error on configuration file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration parse error in '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::NoConfigDir => "No configuration directory available. Using defaults.",
            ConfigError::Io { .. } => "Could not read or write the configuration file.",
            ConfigError::ParseError { .. } => {
                "Configuration file is malformed. Check your settings."
            }
            ConfigError::Serialize(_) => "Failed to save settings. Please try again.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}
