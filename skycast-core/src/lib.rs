//! Core library for the `skycast` weather client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather HTTP client behind a provider trait
//! - Shared domain models (current conditions, forecast entries)
//! - Day-bucketing of 3-hour forecast entries into UTC calendar days
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod bucket;
pub mod city;
pub mod config;
pub mod model;
pub mod provider;

pub use bucket::{BucketError, derive_days, filter_by_day};
pub use city::{CITIES, City, find_city};
pub use config::Config;
pub use model::{Forecast, ForecastEntry, WeatherSnapshot};
pub use provider::{WeatherProvider, provider_from_config};
