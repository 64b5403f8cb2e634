//! Weather data for Pogoda
//!
//! Fetches current conditions and hourly forecasts, maps provider values to
//! display labels, and aggregates hourly samples into daily summaries.

pub mod aggregate;
pub mod client;
pub mod error;
pub mod labels;
pub mod types;

pub use aggregate::{aggregate_daily, DailyAggregator, DEFAULT_MAX_DAYS};
pub use client::WeatherClient;
pub use error::{Endpoint, WeatherError};
pub use labels::{
    compass_point, humidity_comfort, icon_for_condition, uv_level, visibility_quality,
    CompassPoint, HumidityComfort, UvLevel, VisibilityQuality, WeatherIcon,
};
pub use types::*;
