//! In-memory weather gateway for tests and offline runs.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{NaiveDate, NaiveDateTime};

use super::error::WeatherError;
use super::gateway::{DailyWeather, HourlyWeather, WeatherGateway};

/// Weather gateway that serves fixed observations.
///
/// Mimics the Meteostat client's contract: unknown dates and empty windows
/// come back as `Ok(None)`. A failing instance answers every call with an
/// API error, standing in for an unreachable service.
#[derive(Debug, Clone, Default)]
pub struct StaticWeather {
    daily: HashMap<NaiveDate, Option<f64>>,
    hourly: BTreeMap<NaiveDateTime, Option<f64>>,
    failing: bool,
    calls: Arc<AtomicUsize>,
}

impl StaticWeather {
    /// An empty source: every lookup finds no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// A source whose every lookup fails.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Add daily precipitation for `date`. `None` is a row with no value.
    pub fn with_daily(mut self, date: NaiveDate, precipitation_mm: Option<f64>) -> Self {
        self.daily.insert(date, precipitation_mm);
        self
    }

    /// Add hourly precipitation for the hour starting at `time`.
    pub fn with_hourly(mut self, time: NaiveDateTime, precipitation_mm: Option<f64>) -> Self {
        self.hourly.insert(time, precipitation_mm);
        self
    }

    /// Number of gateway calls served so far, including failed ones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn record_call(&self) -> Result<(), WeatherError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if self.failing {
            return Err(WeatherError::Api {
                status: 503,
                message: "static weather source configured to fail".to_string(),
            });
        }
        Ok(())
    }
}

impl WeatherGateway for StaticWeather {
    async fn daily(&self, date: NaiveDate) -> Result<Option<DailyWeather>, WeatherError> {
        self.record_call()?;
        Ok(self.daily.get(&date).map(|&precipitation_mm| DailyWeather {
            date,
            precipitation_mm,
        }))
    }

    async fn hourly(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Option<HourlyWeather>, WeatherError> {
        self.record_call()?;
        if start > end {
            return Ok(None);
        }

        let rows: Vec<Option<f64>> = self.hourly.range(start..=end).map(|(_, &mm)| mm).collect();
        if rows.is_empty() {
            return Ok(None);
        }

        Ok(Some(HourlyWeather {
            start,
            end,
            hours: rows.len(),
            precipitation_mm: rows.into_iter().flatten().sum(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    #[tokio::test]
    async fn serves_daily_rows() {
        let weather = StaticWeather::new().with_daily(date(), Some(1.5));
        let day = weather.daily(date()).await.unwrap().unwrap();
        assert_eq!(day.precipitation_mm, Some(1.5));
        assert_eq!(weather.daily(date().succ_opt().unwrap()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sums_hourly_rows_in_range() {
        let weather = StaticWeather::new()
            .with_hourly(date().and_hms_opt(8, 0, 0).unwrap(), Some(1.0))
            .with_hourly(date().and_hms_opt(9, 0, 0).unwrap(), None)
            .with_hourly(date().and_hms_opt(10, 0, 0).unwrap(), Some(0.25));

        let window = weather
            .hourly(date().and_hms_opt(8, 0, 0).unwrap(), date().and_hms_opt(10, 0, 0).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(window.hours, 3);
        assert_eq!(window.precipitation_mm, 1.25);
    }

    #[tokio::test]
    async fn failing_counts_calls() {
        let weather = StaticWeather::failing();
        assert!(weather.daily(date()).await.is_err());
        assert!(weather.daily(date()).await.is_err());
        assert_eq!(weather.calls(), 2);
    }
}
