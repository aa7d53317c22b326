//! Yes/no rain questions answered from a [`WeatherGateway`].

use chrono::{Duration, NaiveDate};
use tracing::debug;

use super::error::WeatherError;
use super::gateway::WeatherGateway;

/// Whether it rained in Malta on `date`.
///
/// No data for the day reads as no rain.
pub async fn rained_on<G>(gateway: &G, date: NaiveDate) -> Result<bool, WeatherError>
where
    G: WeatherGateway,
{
    let day = gateway.daily(date).await?;
    let rained = day
        .and_then(|d| d.precipitation_mm)
        .is_some_and(|mm| mm > 0.0);

    debug!(%date, rained, "daily rain check");
    Ok(rained)
}

/// Whether it rained in the `lookback_hours` before `hour`:00 on `date`.
///
/// `date` and `hour` are Malta local time, not UTC. Both ends of the window
/// are included. No data for the window reads as no rain.
///
/// # Errors
///
/// Fails if `hour` is not 0-23, if the lookback runs past the earliest
/// representable time, or if the gateway fails.
pub async fn rained_before<G>(
    gateway: &G,
    date: NaiveDate,
    hour: u32,
    lookback_hours: u32,
) -> Result<bool, WeatherError>
where
    G: WeatherGateway,
{
    let end = date
        .and_hms_opt(hour, 0, 0)
        .ok_or_else(|| WeatherError::InvalidQuery(format!("hour must be 0-23, got {hour}")))?;
    let start = end
        .checked_sub_signed(Duration::hours(i64::from(lookback_hours)))
        .ok_or_else(|| {
            WeatherError::InvalidQuery(format!(
                "lookback of {lookback_hours} hours reaches before the earliest supported date"
            ))
        })?;

    let window = gateway.hourly(start, end).await?;
    let rained = window.is_some_and(|w| w.precipitation_mm > 0.0);

    debug!(%start, %end, rained, "hourly rain check");
    Ok(rained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::StaticWeather;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn rained_on_positive_precipitation() {
        let weather = StaticWeather::new().with_daily(date(2024, 1, 5), Some(3.2));
        assert!(rained_on(&weather, date(2024, 1, 5)).await.unwrap());
    }

    #[tokio::test]
    async fn dry_day_is_false() {
        let weather = StaticWeather::new().with_daily(date(2024, 1, 5), Some(0.0));
        assert!(!rained_on(&weather, date(2024, 1, 5)).await.unwrap());
    }

    #[tokio::test]
    async fn missing_day_is_false_not_error() {
        let weather = StaticWeather::new();
        assert!(!rained_on(&weather, date(2024, 1, 5)).await.unwrap());
    }

    #[tokio::test]
    async fn missing_value_is_false() {
        let weather = StaticWeather::new().with_daily(date(2024, 1, 5), None);
        assert!(!rained_on(&weather, date(2024, 1, 5)).await.unwrap());
    }

    #[tokio::test]
    async fn gateway_failure_propagates() {
        let weather = StaticWeather::failing();
        assert!(rained_on(&weather, date(2024, 1, 5)).await.is_err());
        assert!(rained_before(&weather, date(2024, 1, 5), 12, 3).await.is_err());
    }

    #[tokio::test]
    async fn rain_inside_lookback_window() {
        let weather = StaticWeather::new()
            .with_hourly(date(2024, 1, 5).and_hms_opt(9, 0, 0).unwrap(), Some(0.4))
            .with_hourly(date(2024, 1, 5).and_hms_opt(11, 0, 0).unwrap(), Some(0.0));

        assert!(rained_before(&weather, date(2024, 1, 5), 12, 3).await.unwrap());
        assert!(!rained_before(&weather, date(2024, 1, 5), 12, 2).await.unwrap());
    }

    #[tokio::test]
    async fn window_end_inclusive() {
        let weather = StaticWeather::new()
            .with_hourly(date(2024, 1, 5).and_hms_opt(12, 0, 0).unwrap(), Some(1.0));
        assert!(rained_before(&weather, date(2024, 1, 5), 12, 0).await.unwrap());
    }

    #[tokio::test]
    async fn window_crosses_midnight() {
        let weather = StaticWeather::new()
            .with_hourly(date(2024, 1, 4).and_hms_opt(23, 0, 0).unwrap(), Some(2.0));
        assert!(rained_before(&weather, date(2024, 1, 5), 1, 2).await.unwrap());
    }

    #[tokio::test]
    async fn empty_window_is_false() {
        let weather = StaticWeather::new();
        assert!(!rained_before(&weather, date(2024, 1, 5), 12, 6).await.unwrap());
    }

    #[tokio::test]
    async fn invalid_hour_rejected() {
        let weather = StaticWeather::new();
        let err = rained_before(&weather, date(2024, 1, 5), 24, 1).await.unwrap_err();
        assert!(matches!(err, WeatherError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn huge_lookback_rejected() {
        let weather = StaticWeather::new();
        let err = rained_before(&weather, date(2024, 1, 5), 12, u32::MAX)
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::InvalidQuery(_)));
        assert_eq!(weather.calls(), 0);
    }
}
