use std::fmt;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{Password, Select};
use skycast_core::{
    CITIES, City, Config, ForecastEntry, WeatherProvider, derive_days, filter_by_day, find_city,
    provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "City weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather and the forecast for a city.
    Show {
        /// City name or numeric id; when absent an interactive picker opens.
        city: Option<String>,

        /// UTC day to display, e.g. 2023-11-15; defaults to the first forecast day.
        #[arg(long)]
        day: Option<String>,
    },

    /// List the supported cities.
    Cities,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, day } => show(city, day).await,
            Command::Cities => {
                for city in CITIES {
                    println!("{:>8}  {city}", city.id);
                }
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("No API key entered")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(city_arg: Option<String>, day_arg: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let Some(city) = resolve_city(city_arg)? else {
        println!("Please select a city to see the forecast.");
        return Ok(());
    };

    run_city(provider.as_ref(), city, day_arg).await
}

fn resolve_city(arg: Option<String>) -> Result<Option<City>> {
    match arg {
        Some(query) => {
            let city = find_city(&query).ok_or_else(|| {
                anyhow!(
                    "Unknown city '{query}'.\n\
                     Hint: run `skycast cities` to list the supported cities."
                )
            })?;
            Ok(Some(city))
        }
        None => Ok(pick_city()),
    }
}

fn pick_city() -> Option<City> {
    match Select::new("Select a City", CITIES.to_vec()).prompt() {
        Ok(city) => Some(city),
        // Esc, Ctrl-C, or a non-interactive stdin: treat as "nothing chosen".
        Err(_) => None,
    }
}

async fn run_city(
    provider: &dyn WeatherProvider,
    city: City,
    day_arg: Option<String>,
) -> Result<()> {
    println!("Loading data...");

    // The two fetches are independent; issue them concurrently.
    let fetched = tokio::try_join!(provider.current_weather(city.id), provider.forecast(city.id));
    let (snapshot, forecast) = match fetched {
        Ok(pair) => pair,
        Err(err) => {
            tracing::debug!("fetch failed: {err:#}");
            bail!("Unable to fetch data. Please try again later.");
        }
    };

    render::weather_summary(&snapshot);

    let days = match derive_days(&forecast.entries) {
        Ok(days) => days,
        Err(err) => {
            tracing::debug!("day bucketing failed: {err}");
            bail!("Unable to process forecast data. Please try again later.");
        }
    };

    if days.is_empty() {
        println!("No forecast data available.");
        return Ok(());
    }

    if let Some(raw) = day_arg {
        let day = parse_day(&raw)?;
        let rows = filter_rows(&forecast.entries, day)?;
        if rows.is_empty() {
            println!("No forecast entries for {}.", render::day_label(day));
            return Ok(());
        }
        render::forecast_table(day, &rows);
        return Ok(());
    }

    // Default to the first forecast day, then let the user re-filter until
    // they quit. Each selection completes before the next prompt, so a stale
    // response can never overwrite a newer one.
    let mut day = days[0];
    loop {
        let rows = filter_rows(&forecast.entries, day)?;
        render::forecast_table(day, &rows);

        if days.len() < 2 {
            return Ok(());
        }
        match pick_day(&days) {
            Some(next) => day = next,
            None => return Ok(()),
        }
    }
}

fn filter_rows(entries: &[ForecastEntry], day: i64) -> Result<Vec<ForecastEntry>> {
    filter_by_day(entries, day).map_err(|err| {
        tracing::debug!("day bucketing failed: {err}");
        anyhow!("Unable to process forecast data. Please try again later.")
    })
}

/// Parse a `--day` value into the Unix timestamp of that day's UTC midnight.
fn parse_day(raw: &str) -> Result<i64> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Invalid --day value '{raw}', expected YYYY-MM-DD"))?;

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow!("Invalid --day value '{raw}'"))?;

    Ok(midnight.and_utc().timestamp())
}

struct DayChoice(i64);

impl fmt::Display for DayChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render::day_label(self.0))
    }
}

fn pick_day(days: &[i64]) -> Option<i64> {
    let options: Vec<DayChoice> = days.iter().copied().map(DayChoice).collect();

    match Select::new("Forecast day (Esc to quit)", options).prompt() {
        Ok(choice) => Some(choice.0),
        Err(_) => None,
    }
}
