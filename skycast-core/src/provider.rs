use crate::{
    Config,
    model::{Forecast, WeatherSnapshot},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Read-only weather source keyed by a provider-assigned numeric city id.
///
/// The two fetches are independent; callers are free to issue them
/// concurrently.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city_id: u64) -> anyhow::Result<WeatherSnapshot>;

    async fn forecast(&self, city_id: u64) -> anyhow::Result<Forecast>;
}

/// Construct the OpenWeather provider from config, injecting the credential
/// at construction rather than reading it ambiently.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;

    Ok(Box::new(OpenWeatherClient::new(api_key)))
}
