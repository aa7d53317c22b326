//! Caching layer for weather lookups.
//!
//! Historical precipitation rarely changes once published, and the same
//! incident date tends to be asked about repeatedly, so gateway answers are
//! cached per day and per hourly window. Only successful answers are cached;
//! errors always reach the caller and are retried on the next request.

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::weather::{DailyWeather, HourlyWeather, WeatherError, WeatherGateway};

/// Cache key for hourly windows: (start, end), Malta local time.
type WindowKey = (NaiveDateTime, NaiveDateTime);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 1000,
        }
    }
}

/// Weather gateway with caching.
///
/// Wraps any [`WeatherGateway`] and is one itself.
pub struct CachedWeather<G> {
    inner: G,

    /// Daily answers, keyed by date.
    daily: MokaCache<NaiveDate, Option<DailyWeather>>,

    /// Hourly window answers, keyed by (start, end).
    hourly: MokaCache<WindowKey, Option<HourlyWeather>>,
}

impl<G: WeatherGateway> CachedWeather<G> {
    /// Create a new cached gateway.
    pub fn new(inner: G, config: &CacheConfig) -> Self {
        Self {
            inner,
            daily: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
            hourly: MokaCache::builder()
                .time_to_live(config.ttl)
                .max_capacity(config.max_capacity)
                .build(),
        }
    }

    /// The wrapped gateway.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.daily.invalidate_all();
        self.hourly.invalidate_all();
    }
}

impl<G: WeatherGateway> WeatherGateway for CachedWeather<G> {
    async fn daily(&self, date: NaiveDate) -> Result<Option<DailyWeather>, WeatherError> {
        if let Some(cached) = self.daily.get(&date).await {
            trace!(%date, "daily weather cache hit");
            return Ok(cached);
        }

        let fresh = self.inner.daily(date).await?;
        self.daily.insert(date, fresh.clone()).await;
        Ok(fresh)
    }

    async fn hourly(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Option<HourlyWeather>, WeatherError> {
        let key = (start, end);
        if let Some(cached) = self.hourly.get(&key).await {
            trace!(%start, %end, "hourly weather cache hit");
            return Ok(cached);
        }

        let fresh = self.inner.hourly(start, end).await?;
        self.hourly.insert(key, fresh.clone()).await;
        Ok(fresh)
    }
}
