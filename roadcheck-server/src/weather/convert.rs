//! Aggregation of per-station Meteostat rows into gateway records.
//!
//! Each timestamp's precipitation is the mean over the stations that
//! reported a value for it. Stations that have a row but no value do not
//! drag the mean down.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};

use super::error::WeatherError;
use super::gateway::{DailyWeather, HourlyWeather};
use super::types::{DailyRow, HourlyRow};

/// Format of `time` in hourly rows.
const HOURLY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Combine daily rows from several stations into the record for `date`.
///
/// Returns `None` when no station has a row for `date`.
pub(super) fn aggregate_daily(date: NaiveDate, stations: &[Vec<DailyRow>]) -> Option<DailyWeather> {
    let rows: Vec<&DailyRow> = stations
        .iter()
        .flatten()
        .filter(|row| row.date == date)
        .collect();

    if rows.is_empty() {
        return None;
    }

    Some(DailyWeather {
        date,
        precipitation_mm: mean(rows.iter().filter_map(|row| row.prcp)),
    })
}

/// Combine hourly rows from several stations into the sum over `[start, end]`.
///
/// Returns `None` when no station has a row in the window.
pub(super) fn aggregate_hourly(
    start: NaiveDateTime,
    end: NaiveDateTime,
    stations: &[Vec<HourlyRow>],
) -> Result<Option<HourlyWeather>, WeatherError> {
    // Keyed by naive local time: the repeated hour on the autumn fall-back
    // day shares one key, so its two readings are averaged.
    let mut by_hour: BTreeMap<NaiveDateTime, Vec<f64>> = BTreeMap::new();

    for row in stations.iter().flatten() {
        let time = parse_hourly_time(&row.time)?;
        if time < start || time > end {
            continue;
        }
        let values = by_hour.entry(time).or_default();
        if let Some(mm) = row.prcp {
            values.push(mm);
        }
    }

    if by_hour.is_empty() {
        return Ok(None);
    }

    let precipitation_mm: f64 = by_hour
        .values()
        .filter_map(|values| mean(values.iter().copied()))
        .sum();

    Ok(Some(HourlyWeather {
        start,
        end,
        hours: by_hour.len(),
        precipitation_mm,
    }))
}

fn parse_hourly_time(text: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(text, HOURLY_TIME_FORMAT).map_err(|e| WeatherError::Json {
        message: format!("invalid hourly time {text:?}: {e}"),
        body: None,
    })
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn daily(d: u32, prcp: Option<f64>) -> DailyRow {
        DailyRow { date: date(d), prcp }
    }

    fn hourly(time: &str, prcp: Option<f64>) -> HourlyRow {
        HourlyRow {
            time: time.to_string(),
            prcp,
        }
    }

    fn at(d: u32, h: u32) -> NaiveDateTime {
        date(d).and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn daily_mean_across_stations() {
        let stations = vec![
            vec![daily(5, Some(2.0)), daily(6, Some(0.0))],
            vec![daily(5, Some(4.0))],
            vec![daily(5, None)],
        ];
        let day = aggregate_daily(date(5), &stations).unwrap();
        assert_eq!(day.precipitation_mm, Some(3.0));
    }

    #[test]
    fn daily_without_rows_is_none() {
        let stations = vec![vec![daily(6, Some(1.0))], vec![]];
        assert_eq!(aggregate_daily(date(5), &stations), None);
        assert_eq!(aggregate_daily(date(5), &[]), None);
    }

    #[test]
    fn daily_rows_without_values() {
        let stations = vec![vec![daily(5, None)]];
        let day = aggregate_daily(date(5), &stations).unwrap();
        assert_eq!(day.precipitation_mm, None);
    }

    #[test]
    fn hourly_sum_of_means_within_window() {
        let stations = vec![
            vec![
                hourly("2024-01-05 08:00:00", Some(5.0)),
                hourly("2024-01-05 09:00:00", Some(1.0)),
                hourly("2024-01-05 10:00:00", None),
            ],
            vec![
                hourly("2024-01-05 09:00:00", Some(3.0)),
                hourly("2024-01-05 11:00:00", Some(0.5)),
            ],
        ];
        let window = aggregate_hourly(at(5, 9), at(5, 11), &stations)
            .unwrap()
            .unwrap();

        assert_eq!(window.hours, 3);
        assert!((window.precipitation_mm - 2.5).abs() < 1e-9);
    }

    #[test]
    fn hourly_without_rows_is_none() {
        let stations = vec![vec![hourly("2024-01-05 08:00:00", Some(5.0))]];
        assert_eq!(aggregate_hourly(at(5, 9), at(5, 11), &stations).unwrap(), None);
    }

    #[test]
    fn repeated_local_hour_shares_one_slot() {
        let stations = vec![vec![
            hourly("2024-10-27 02:00:00", Some(2.0)),
            hourly("2024-10-27 02:00:00", Some(0.0)),
        ]];
        let start = NaiveDate::from_ymd_opt(2024, 10, 27)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let end = start + chrono::Duration::hours(4);
        let window = aggregate_hourly(start, end, &stations).unwrap().unwrap();

        assert_eq!(window.hours, 1);
        assert!((window.precipitation_mm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn hourly_bad_time_is_error() {
        let stations = vec![vec![hourly("05/01/2024 09:00", Some(1.0))]];
        assert!(aggregate_hourly(at(5, 9), at(5, 11), &stations).is_err());
    }
}
