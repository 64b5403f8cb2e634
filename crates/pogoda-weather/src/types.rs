use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::WeatherError;
use crate::labels::{
    compass_point, humidity_comfort, icon_for_condition, visibility_quality, CompassPoint,
    HumidityComfort, VisibilityQuality, WeatherIcon,
};

const DEFAULT_VISIBILITY_METERS: u32 = 10_000;

fn default_visibility() -> u32 {
    DEFAULT_VISIBILITY_METERS
}

/// Location key for a weather request: a city name or a coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationQuery {
    City(String),
    Coordinates { latitude: f64, longitude: f64 },
}

impl LocationQuery {
    pub fn city(name: impl Into<String>) -> Self {
        Self::City(name.into())
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self::Coordinates {
            latitude,
            longitude,
        }
    }

    /// Reject keys that can never produce a meaningful request.
    pub fn validate(&self) -> Result<(), WeatherError> {
        match self {
            Self::City(name) if name.trim().is_empty() => Err(WeatherError::InvalidLocation(
                "city name is empty".to_string(),
            )),
            Self::City(_) => Ok(()),
            Self::Coordinates {
                latitude,
                longitude,
            } => {
                if !latitude.is_finite() || !(-90.0..=90.0).contains(latitude) {
                    return Err(WeatherError::InvalidLocation(format!(
                        "latitude {latitude} outside [-90, 90]"
                    )));
                }
                if !longitude.is_finite() || !(-180.0..=180.0).contains(longitude) {
                    return Err(WeatherError::InvalidLocation(format!(
                        "longitude {longitude} outside [-180, 180]"
                    )));
                }
                Ok(())
            }
        }
    }

    /// Query string parameters identifying this location.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::City(name) => vec![("city", name.trim().to_string())],
            Self::Coordinates {
                latitude,
                longitude,
            } => vec![("lat", latitude.to_string()), ("lon", longitude.to_string())],
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City(name) => write!(f, "{}", name.trim()),
            Self::Coordinates {
                latitude,
                longitude,
            } => write!(f, "{latitude},{longitude}"),
        }
    }
}

/// Current conditions as returned by the current-weather endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: u8,
    /// Meters
    #[serde(default = "default_visibility")]
    pub visibility: u32,
    pub wind_speed: f64,
    #[serde(rename = "wind_deg", default)]
    pub wind_direction_deg: f64,
    #[serde(default)]
    pub wind_gust: Option<f64>,
    #[serde(rename = "clouds")]
    pub cloudiness: u8,
    /// Provider's text description, localized by the provider
    #[serde(rename = "condition")]
    pub description: String,
    #[serde(rename = "icon")]
    pub condition_code: String,
    pub sunrise: i64,
    pub sunset: i64,
    pub city_name: String,
}

impl CurrentWeather {
    /// Gust speed, falling back to the sustained wind speed.
    pub fn wind_gust(&self) -> f64 {
        self.wind_gust.unwrap_or(self.wind_speed)
    }

    pub fn icon(&self) -> WeatherIcon {
        icon_for_condition(&self.condition_code)
    }

    pub fn wind_direction(&self) -> CompassPoint {
        compass_point(self.wind_direction_deg)
    }

    pub fn visibility_quality(&self) -> VisibilityQuality {
        visibility_quality(self.visibility)
    }

    pub fn humidity_comfort(&self) -> HumidityComfort {
        humidity_comfort(self.humidity)
    }

    pub fn sunrise_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.sunrise, 0)
    }

    pub fn sunset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.sunset, 0)
    }
}

/// One forecast data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Seconds since epoch
    #[serde(rename = "dt")]
    pub timestamp: i64,
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: i64,
    pub humidity: u8,
    pub wind_speed: f64,
    #[serde(rename = "wind_deg", default)]
    pub wind_direction_deg: f64,
    #[serde(rename = "clouds")]
    pub cloudiness: u8,
    #[serde(rename = "condition")]
    pub description: String,
    #[serde(rename = "icon")]
    pub condition_code: String,
    /// Probability of precipitation in [0, 1]
    #[serde(rename = "pop", default)]
    pub precipitation_probability: f64,
}

impl HourlySample {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    pub fn icon(&self) -> WeatherIcon {
        icon_for_condition(&self.condition_code)
    }

    pub fn wind_direction(&self) -> CompassPoint {
        compass_point(self.wind_direction_deg)
    }
}

/// Forecast for one location: ordered hourly samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastBundle {
    pub city_name: String,
    pub forecast: Vec<HourlySample>,
    /// Seconds east of UTC, when the provider reports it
    #[serde(default)]
    pub timezone: Option<i32>,
}

/// Aggregated forecast for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub representative_condition_code: String,
    pub representative_description: String,
    /// Percent, 0-100
    pub precipitation_probability_max: u8,
    pub sample_count: usize,
}

impl DailySummary {
    pub fn icon(&self) -> WeatherIcon {
        icon_for_condition(&self.representative_condition_code)
    }
}
