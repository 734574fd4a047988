use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::model::{Forecast, ForecastEntry, WeatherSnapshot};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Client against a non-default endpoint, used by tests against a mock
    /// server.
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url,
        }
    }

    async fn get_json(&self, endpoint: &str, city_id: u64) -> Result<String> {
        let url = format!("{}/{endpoint}", self.base_url);
        let id = city_id.to_string();

        tracing::debug!(endpoint, city_id, "requesting OpenWeather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("id", id.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({endpoint})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {endpoint} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                endpoint,
                status,
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn map_snapshot(parsed: OwCurrentResponse) -> WeatherSnapshot {
    let observation_time = unix_to_utc(parsed.dt).unwrap_or_else(Utc::now);

    let (condition, condition_description) = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| (w.main, w.description))
        .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string()));

    WeatherSnapshot {
        city_name: parsed.name,
        country: parsed.sys.country,
        condition,
        condition_description,
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed,
        observation_time,
    }
}

fn map_entry(entry: OwForecastEntry) -> ForecastEntry {
    let (condition_description, condition_icon) = entry
        .weather
        .into_iter()
        .next()
        .map(|w| (w.description, w.icon))
        .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

    ForecastEntry {
        timestamp: entry.dt,
        temperature_min_c: entry.main.temp_min,
        temperature_max_c: entry.main.temp_max,
        humidity_pct: entry.main.humidity,
        wind_speed_mps: entry.wind.speed,
        precipitation_probability: entry.pop,
        condition_description,
        condition_icon,
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city_id: u64) -> Result<WeatherSnapshot> {
        let body = self.get_json("weather", city_id).await?;

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        Ok(map_snapshot(parsed))
    }

    async fn forecast(&self, city_id: u64) -> Result<Forecast> {
        let body = self.get_json("forecast", city_id).await?;

        let parsed: OwForecastResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather forecast JSON")?;

        Ok(Forecast {
            city_name: parsed.city.name,
            country: parsed.city.country,
            entries: parsed.list.into_iter().map(map_entry).collect(),
        })
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Back off to a char boundary so multi-byte UTF-8 never splits.
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
