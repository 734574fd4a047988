//! Human-friendly formatting for the terminal.
//!
//! All labels are rendered in UTC, matching the timestamps the provider
//! returns.

use chrono::{DateTime, Utc};
use skycast_core::{ForecastEntry, WeatherSnapshot};

/// Day-selector label, e.g. "Sat Sep 15".
pub fn day_label(day: i64) -> String {
    format_utc(day, "%a %b %-d")
}

/// Table row time label, e.g. "Saturday, 15 Sep 12 AM".
pub fn time_label(ts: i64) -> String {
    format_utc(ts, "%A, %-d %b %-I %p")
}

fn format_utc(ts: i64, fmt: &str) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_else(|| ts.to_string())
}

fn high_low(entry: &ForecastEntry) -> String {
    format!(
        "{}°C / {}°C",
        entry.temperature_max_c.round() as i64,
        entry.temperature_min_c.round() as i64,
    )
}

fn precipitation(entry: &ForecastEntry) -> String {
    format!("{}%", (entry.precipitation_probability * 100.0).round() as i64)
}

fn description(entry: &ForecastEntry) -> String {
    if entry.condition_icon.is_empty() {
        entry.condition_description.clone()
    } else {
        format!("[{}] {}", entry.condition_icon, entry.condition_description)
    }
}

pub fn weather_summary(snapshot: &WeatherSnapshot) {
    println!();
    println!("{}, {}", snapshot.city_name, snapshot.country);
    println!("{}", snapshot.condition.to_uppercase());
    println!("{}", snapshot.condition_description);
    println!(
        "{:.1} °C (feels like {:.1} °C)",
        snapshot.temperature_c, snapshot.feels_like_c
    );
    println!("Wind: {} m/sec", snapshot.wind_speed_mps);
    println!("Humidity: {}%", snapshot.humidity_pct);
}

pub fn forecast_table(day: i64, rows: &[ForecastEntry]) {
    println!();
    println!("Forecast for {}", day_label(day));
    println!(
        "{:<26} {:<30} {:>13} {:>7} {:>12} {:>9}",
        "Time", "Description", "High / Low", "Precip", "Wind", "Humidity"
    );

    for entry in rows {
        println!(
            "{:<26} {:<30} {:>13} {:>7} {:>12} {:>9}",
            time_label(entry.timestamp),
            description(entry),
            high_low(entry),
            precipitation(entry),
            format!("{} m/sec", entry.wind_speed_mps),
            format!("{}%", entry.humidity_pct),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(timestamp: i64) -> ForecastEntry {
        ForecastEntry {
            timestamp,
            temperature_min_c: 17.6,
            temperature_max_c: 24.4,
            humidity_pct: 60,
            wind_speed_mps: 3.5,
            precipitation_probability: 0.35,
            condition_description: "light rain".to_string(),
            condition_icon: "10d".to_string(),
        }
    }

    #[test]
    fn day_label_is_short_weekday_month_day_utc() {
        // 2023-09-15 00:00 UTC, a Friday.
        assert_eq!(day_label(1_694_736_000), "Fri Sep 15");
        // 2023-11-14 00:00 UTC, a Tuesday.
        assert_eq!(day_label(1_699_920_000), "Tue Nov 14");
    }

    #[test]
    fn time_label_is_long_weekday_with_twelve_hour_clock() {
        // 2023-11-14 22:13:20 UTC.
        assert_eq!(time_label(1_700_000_000), "Tuesday, 14 Nov 10 PM");
        // Midnight renders as 12 AM.
        assert_eq!(time_label(1_699_920_000), "Tuesday, 14 Nov 12 AM");
    }

    #[test]
    fn high_low_rounds_to_whole_degrees() {
        assert_eq!(high_low(&entry(0)), "24°C / 18°C");
    }

    #[test]
    fn precipitation_is_an_integer_percentage() {
        assert_eq!(precipitation(&entry(0)), "35%");
    }

    #[test]
    fn description_includes_icon_code_when_present() {
        let mut e = entry(0);
        assert_eq!(description(&e), "[10d] light rain");

        e.condition_icon.clear();
        assert_eq!(description(&e), "light rain");
    }
}
