//! The weather source contract.

use std::future::Future;

use chrono::{NaiveDate, NaiveDateTime};

use super::error::WeatherError;

/// Precipitation for one day, aggregated across stations.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyWeather {
    pub date: NaiveDate,

    /// Total precipitation in millimetres, if any station reported it.
    pub precipitation_mm: Option<f64>,
}

/// Precipitation summed over a range of hours.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlyWeather {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,

    /// Number of hourly observations the sum covers.
    pub hours: usize,

    /// Sum of hourly precipitation in millimetres. Hours without a
    /// reported value count as zero.
    pub precipitation_mm: f64,
}

/// A source of aggregated precipitation for Malta.
///
/// Times are Malta local time. `Ok(None)` means the source has no data for
/// the request; an `Err` means the source could not be asked.
pub trait WeatherGateway: Send + Sync {
    /// Daily precipitation on `date`.
    fn daily(
        &self,
        date: NaiveDate,
    ) -> impl Future<Output = Result<Option<DailyWeather>, WeatherError>> + Send;

    /// Hourly precipitation summed over `[start, end]`.
    fn hourly(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Future<Output = Result<Option<HourlyWeather>, WeatherError>> + Send;
}
