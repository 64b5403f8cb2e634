//! Display labels derived from raw provider values.
//!
//! None of these functions fail: out-of-table inputs resolve to a fixed default.

use pogoda_core::Locale;
use serde::{Deserialize, Serialize};

/// Icon shown for a provider condition code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherIcon {
    Sun,
    Moon,
    CloudSun,
    CloudMoon,
    #[default]
    Cloud,
    Cloudy,
    CloudRain,
    CloudRainWind,
    CloudLightning,
    CloudSnow,
    CloudFog,
}

impl WeatherIcon {
    /// Icon name as used by the front-end icon set
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::CloudSun => "CloudSun",
            Self::CloudMoon => "CloudMoon",
            Self::Cloud => "Cloud",
            Self::Cloudy => "Cloudy",
            Self::CloudRain => "CloudRain",
            Self::CloudRainWind => "CloudRainWind",
            Self::CloudLightning => "CloudLightning",
            Self::CloudSnow => "CloudSnow",
            Self::CloudFog => "CloudFog",
        }
    }
}

/// Map a provider condition code (`01d`, `10n`, ...) to an icon.
/// Unknown codes fall back to [`WeatherIcon::Cloud`].
pub fn icon_for_condition(code: &str) -> WeatherIcon {
    match code {
        "01d" => WeatherIcon::Sun,
        "01n" => WeatherIcon::Moon,
        "02d" => WeatherIcon::CloudSun,
        "02n" => WeatherIcon::CloudMoon,
        "03d" | "03n" => WeatherIcon::Cloud,
        "04d" | "04n" => WeatherIcon::Cloudy,
        "09d" | "09n" => WeatherIcon::CloudRain,
        "10d" | "10n" => WeatherIcon::CloudRainWind,
        "11d" | "11n" => WeatherIcon::CloudLightning,
        "13d" | "13n" => WeatherIcon::CloudSnow,
        "50d" | "50n" => WeatherIcon::CloudFog,
        _ => WeatherIcon::default(),
    }
}

/// Eight-point compass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassPoint {
    /// Clockwise from north, one per 45° sector
    pub const ALL: [CompassPoint; 8] = [
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
    ];

    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::North => "N",
                Self::NorthEast => "NE",
                Self::East => "E",
                Self::SouthEast => "SE",
                Self::South => "S",
                Self::SouthWest => "SW",
                Self::West => "W",
                Self::NorthWest => "NW",
            },
            Locale::Ru => match self {
                Self::North => "С",
                Self::NorthEast => "СВ",
                Self::East => "В",
                Self::SouthEast => "ЮВ",
                Self::South => "Ю",
                Self::SouthWest => "ЮЗ",
                Self::West => "З",
                Self::NorthWest => "СЗ",
            },
        }
    }
}

/// Round a wind angle to the nearest of eight 45° sectors.
///
/// Angles are taken modulo 360, so negative and >360 inputs wrap.
/// Non-finite input yields north.
pub fn compass_point(degrees: f64) -> CompassPoint {
    if !degrees.is_finite() {
        return CompassPoint::North;
    }
    let normalized = degrees.rem_euclid(360.0);
    let sector = (normalized / 45.0).round() as usize % 8;
    CompassPoint::ALL[sector]
}

/// Visibility quality, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VisibilityQuality {
    VeryPoor,
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl VisibilityQuality {
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Excellent => "excellent",
                Self::Good => "good",
                Self::Moderate => "moderate",
                Self::Poor => "poor",
                Self::VeryPoor => "very poor",
            },
            Locale::Ru => match self {
                Self::Excellent => "Отличная",
                Self::Good => "Хорошая",
                Self::Moderate => "Средняя",
                Self::Poor => "Плохая",
                Self::VeryPoor => "Очень плохая",
            },
        }
    }
}

/// Visibility in meters to a quality band
pub fn visibility_quality(meters: u32) -> VisibilityQuality {
    match meters {
        10_000.. => VisibilityQuality::Excellent,
        5_000..=9_999 => VisibilityQuality::Good,
        2_000..=4_999 => VisibilityQuality::Moderate,
        1_000..=1_999 => VisibilityQuality::Poor,
        _ => VisibilityQuality::VeryPoor,
    }
}

/// Relative humidity comfort band, ordered driest to wettest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HumidityComfort {
    Dry,
    Comfortable,
    Humid,
    VeryHumid,
}

impl HumidityComfort {
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Dry => "dry",
                Self::Comfortable => "comfortable",
                Self::Humid => "humid",
                Self::VeryHumid => "very humid",
            },
            Locale::Ru => match self {
                Self::Dry => "Сухо",
                Self::Comfortable => "Комфортно",
                Self::Humid => "Влажно",
                Self::VeryHumid => "Очень влажно",
            },
        }
    }
}

/// Relative humidity percent to a comfort band
pub fn humidity_comfort(percent: u8) -> HumidityComfort {
    match percent {
        0..=29 => HumidityComfort::Dry,
        30..=59 => HumidityComfort::Comfortable,
        60..=79 => HumidityComfort::Humid,
        _ => HumidityComfort::VeryHumid,
    }
}

/// UV exposure level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum UvLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl UvLevel {
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Low => "low",
                Self::Moderate => "moderate",
                Self::High => "high",
                Self::VeryHigh => "very high",
                Self::Extreme => "extreme",
            },
            Locale::Ru => match self {
                Self::Low => "Низкий",
                Self::Moderate => "Средний",
                Self::High => "Высокий",
                Self::VeryHigh => "Очень высокий",
                Self::Extreme => "Экстремальный",
            },
        }
    }
}

/// UV index to exposure level. NaN counts as extreme.
pub fn uv_level(index: f64) -> UvLevel {
    if index <= 2.0 {
        UvLevel::Low
    } else if index <= 5.0 {
        UvLevel::Moderate
    } else if index <= 7.0 {
        UvLevel::High
    } else if index <= 10.0 {
        UvLevel::VeryHigh
    } else {
        UvLevel::Extreme
    }
}
