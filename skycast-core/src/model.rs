use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One 3-hour forecast sample with a UTC timestamp.
///
/// Entries normally arrive sorted ascending by `timestamp` at a fixed 3-hour
/// step, but nothing downstream may rely on uniform spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Unix seconds, UTC.
    pub timestamp: i64,
    pub temperature_min_c: f64,
    pub temperature_max_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Probability of precipitation in `[0, 1]`.
    pub precipitation_probability: f64,
    pub condition_description: String,
    /// Provider icon code, e.g. "10d".
    pub condition_icon: String,
}

/// Current conditions for a city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub country: String,
    /// Condition group, e.g. "Clouds".
    pub condition: String,
    pub condition_description: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub observation_time: DateTime<Utc>,
}

/// Multi-day forecast: the flat entry list plus city metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub city_name: String,
    pub country: String,
    pub entries: Vec<ForecastEntry>,
}
