//! Day-bucketing of forecast entries.
//!
//! Groups a flat, time-ordered list of 3-hour forecast entries into UTC
//! calendar days. A day is identified by the Unix timestamp of its UTC
//! midnight, so `1700000000` (2023-11-14 22:13 UTC) buckets under
//! `1699920000` (2023-11-14 00:00 UTC). Both operations are pure and O(n).

use std::collections::HashSet;

use thiserror::Error;

use crate::model::ForecastEntry;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BucketError {
    /// The entry's timestamp cannot be aligned to a UTC day. Failing loudly
    /// here keeps a malformed entry from landing in the wrong bucket.
    #[error("forecast entry has invalid timestamp {timestamp}")]
    InvalidEntry { timestamp: i64 },
}

/// UTC-midnight alignment of an entry's timestamp.
fn day_id(entry: &ForecastEntry) -> Result<i64, BucketError> {
    let ts = entry.timestamp;
    if ts < 0 {
        return Err(BucketError::InvalidEntry { timestamp: ts });
    }
    Ok(ts / SECONDS_PER_DAY * SECONDS_PER_DAY)
}

/// The distinct UTC calendar days present in `entries`, each as the Unix
/// timestamp of that day's UTC midnight, in first-occurrence order.
pub fn derive_days(entries: &[ForecastEntry]) -> Result<Vec<i64>, BucketError> {
    let mut seen = HashSet::new();
    let mut days = Vec::new();

    for entry in entries {
        let id = day_id(entry)?;
        if seen.insert(id) {
            days.push(id);
        }
    }

    Ok(days)
}

/// The entries whose UTC-midnight alignment equals `day`, preserving input
/// order. A `day` matching no entry yields an empty vec; that is not an error.
pub fn filter_by_day(entries: &[ForecastEntry], day: i64) -> Result<Vec<ForecastEntry>, BucketError> {
    let mut matched = Vec::new();

    for entry in entries {
        if day_id(entry)? == day {
            matched.push(entry.clone());
        }
    }

    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(timestamp: i64) -> ForecastEntry {
        ForecastEntry {
            timestamp,
            temperature_min_c: 10.0,
            temperature_max_c: 14.0,
            humidity_pct: 60,
            wind_speed_mps: 3.5,
            precipitation_probability: 0.2,
            condition_description: "scattered clouds".to_string(),
            condition_icon: "03d".to_string(),
        }
    }

    #[test]
    fn empty_input_yields_empty_outputs() {
        assert_eq!(derive_days(&[]).unwrap(), Vec::<i64>::new());
        assert_eq!(filter_by_day(&[], 1_699_920_000).unwrap(), Vec::new());
    }

    #[test]
    fn days_are_utc_midnights_in_first_occurrence_order() {
        // 2023-11-14 22:13 UTC, then two entries on 2023-11-15.
        let entries = [entry(1_700_000_000), entry(1_700_010_800), entry(1_700_021_600)];

        let days = derive_days(&entries).unwrap();

        assert_eq!(days, vec![1_699_920_000, 1_700_006_400]);
    }

    #[test]
    fn no_duplicate_days_and_every_entry_is_covered() {
        let entries: Vec<ForecastEntry> =
            (0..40).map(|i| entry(1_700_000_000 + i * 10_800)).collect();

        let days = derive_days(&entries).unwrap();

        let mut deduped = days.clone();
        deduped.dedup();
        assert_eq!(days, deduped);
        assert_eq!(days.len(), {
            let unique: HashSet<i64> = days.iter().copied().collect();
            unique.len()
        });

        for e in &entries {
            let aligned = e.timestamp / 86_400 * 86_400;
            assert_eq!(days.iter().filter(|&&d| d == aligned).count(), 1);
        }
    }

    #[test]
    fn derive_days_is_deterministic() {
        let entries = [entry(1_700_000_000), entry(1_700_010_800), entry(1_700_021_600)];

        assert_eq!(derive_days(&entries).unwrap(), derive_days(&entries).unwrap());
    }

    #[test]
    fn filter_returns_only_entries_aligned_to_the_day() {
        let entries = [entry(1_700_000_000), entry(1_700_010_800), entry(1_700_021_600)];

        let rows = filter_by_day(&entries, 1_700_006_400).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp, 1_700_010_800);
        assert_eq!(rows[1].timestamp, 1_700_021_600);
    }

    #[test]
    fn every_derived_day_filters_to_a_nonempty_aligned_subsequence() {
        let entries: Vec<ForecastEntry> =
            (0..40).map(|i| entry(1_700_000_000 + i * 10_800)).collect();

        for day in derive_days(&entries).unwrap() {
            let rows = filter_by_day(&entries, day).unwrap();
            assert!(!rows.is_empty());
            for row in &rows {
                assert_eq!(row.timestamp / 86_400 * 86_400, day);
            }
        }
    }

    #[test]
    fn filter_preserves_relative_order() {
        let entries: Vec<ForecastEntry> =
            (0..40).map(|i| entry(1_700_000_000 + i * 10_800)).collect();

        for day in derive_days(&entries).unwrap() {
            let rows = filter_by_day(&entries, day).unwrap();
            let timestamps: Vec<i64> = rows.iter().map(|r| r.timestamp).collect();
            let mut sorted = timestamps.clone();
            sorted.sort_unstable();
            assert_eq!(timestamps, sorted);
        }
    }

    #[test]
    fn unknown_day_filters_to_empty() {
        let entries = [entry(1_700_000_000), entry(1_700_010_800)];

        // 2024-01-01 00:00 UTC, nowhere in the input.
        let rows = filter_by_day(&entries, 1_704_067_200).unwrap();

        assert!(rows.is_empty());
    }

    #[test]
    fn negative_timestamp_is_rejected() {
        let entries = [entry(1_700_000_000), entry(-1)];

        let err = derive_days(&entries).unwrap_err();
        assert_eq!(err, BucketError::InvalidEntry { timestamp: -1 });

        let err = filter_by_day(&entries, 1_699_920_000).unwrap_err();
        assert_eq!(err, BucketError::InvalidEntry { timestamp: -1 });
    }

    #[test]
    fn midnight_entry_buckets_under_its_own_day() {
        let entries = [entry(1_699_920_000)];

        assert_eq!(derive_days(&entries).unwrap(), vec![1_699_920_000]);
        assert_eq!(filter_by_day(&entries, 1_699_920_000).unwrap().len(), 1);
    }
}
