//! Wire types for the skycast backend.

use serde::{Deserialize, Serialize};

/// Display unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl Unit {
    /// Query-parameter form expected by the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fahrenheit => "fahrenheit",
            Self::Celsius => "celsius",
        }
    }
}

/// A geographic position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// One autocomplete dropdown entry.
///
/// The backend sends `lat`/`lon` as null on informational items (for
/// example its rate-limit notice), which also arrive flagged `disabled`.
#[derive(Debug, Clone, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub disabled: bool,
}

impl Suggestion {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
            _ => None,
        }
    }

    /// Whether picking this entry should trigger a weather fetch.
    pub fn is_selectable(&self) -> bool {
        !self.disabled && self.coordinate().is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AutocompleteResponse {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A geocoded query: the coordinate plus the label the backend echoed.
#[derive(Debug, Clone, PartialEq)]
pub struct Geocoded {
    pub label: Option<String>,
    pub coordinate: Coordinate,
}

/// Current conditions as reported by the backend.
///
/// Every measurement is optional; upstream gaps come through as nulls
/// and the renderer decides the fallback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CurrentWeather {
    pub temperature: Option<f64>,
    pub apparent_temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub precipitation: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub pressure: Option<f64>,
    pub wind_speed: Option<f64>,
    #[serde(rename = "wind_dir")]
    pub wind_direction: Option<f64>,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "code_text", default)]
    pub description: String,
    #[serde(rename = "time")]
    pub timestamp: Option<String>,
}

/// One forecast row. Dates stay as the backend's ISO strings and are
/// parsed at render time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastDay {
    #[serde(default)]
    pub date: String,
    pub t_max: Option<f64>,
    pub t_min: Option<f64>,
    #[serde(rename = "pop")]
    pub precipitation_probability: Option<f64>,
    pub wind_max: Option<f64>,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "code_text", default)]
    pub description: String,
}

/// Full `/api/weather` payload: current conditions plus the daily rows,
/// already converted to the requested unit server-side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub unit: Option<Unit>,
    #[serde(default)]
    pub current: CurrentWeather,
    #[serde(default)]
    pub daily: Vec<ForecastDay>,
    #[serde(default)]
    pub(crate) error: Option<String>,
}
