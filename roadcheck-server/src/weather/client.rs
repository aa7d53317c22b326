//! Meteostat JSON API client.
//!
//! Queries every configured weather station concurrently and aggregates
//! the results (see [`super::convert`]). When no stations are configured,
//! they are discovered once around the centre of Malta and remembered for
//! the life of the client.

use chrono::{NaiveDate, NaiveDateTime};
use futures::future::try_join_all;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::convert::{aggregate_daily, aggregate_hourly};
use super::error::WeatherError;
use super::gateway::{DailyWeather, HourlyWeather, WeatherGateway};
use super::types::{DailyRow, Envelope, HourlyRow, StationRow};

/// Default base URL for the Meteostat JSON API.
const DEFAULT_BASE_URL: &str = "https://meteostat.p.rapidapi.com";

/// Host header the API gateway routes on.
const API_HOST: &str = "meteostat.p.rapidapi.com";

/// Timezone hourly data is requested in.
const MALTA_TZ: &str = "Europe/Malta";

/// Centre of the Maltese islands, used for station discovery.
const MALTA_CENTRE: (f64, f64) = (35.9375, 14.3754);

/// Radius around [`MALTA_CENTRE`] searched for stations, in kilometres.
const DISCOVERY_RADIUS_KM: u32 = 50;

/// Maximum number of discovered stations.
const DISCOVERY_LIMIT: u32 = 10;

/// Configuration for the Meteostat client.
#[derive(Debug, Clone)]
pub struct MeteostatConfig {
    /// API key for the `x-rapidapi-key` header
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Station ids to aggregate over; discovered when `None`
    pub stations: Option<Vec<String>>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MeteostatConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            stations: None,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use a fixed set of stations instead of discovering them.
    pub fn with_stations<I, S>(mut self, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stations = Some(stations.into_iter().map(Into::into).collect());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Meteostat API client aggregating over Malta's weather stations.
#[derive(Debug)]
pub struct MeteostatClient {
    http: reqwest::Client,
    base_url: String,
    stations: OnceCell<Vec<String>>,
}

impl MeteostatClient {
    /// Create a new Meteostat client with the given configuration.
    pub fn new(config: MeteostatConfig) -> Result<Self, WeatherError> {
        let mut headers = HeaderMap::new();

        let api_key =
            HeaderValue::from_str(&config.api_key).map_err(|_| WeatherError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert("x-rapidapi-key", api_key);
        headers.insert("x-rapidapi-host", HeaderValue::from_static(API_HOST));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        let stations = match config.stations {
            Some(ids) if !ids.is_empty() => OnceCell::new_with(Some(ids)),
            _ => OnceCell::new(),
        };

        Ok(Self {
            http,
            base_url: config.base_url,
            stations,
        })
    }

    /// The stations this client aggregates over, discovering them if needed.
    pub async fn stations(&self) -> Result<&[String], WeatherError> {
        let ids = self
            .stations
            .get_or_try_init(|| self.discover_stations())
            .await?;
        Ok(ids)
    }

    /// Find weather stations around the centre of Malta.
    async fn discover_stations(&self) -> Result<Vec<String>, WeatherError> {
        let (lat, lon) = MALTA_CENTRE;
        let rows: Vec<StationRow> = self
            .get_rows(
                "stations/nearby",
                &[
                    ("lat", lat.to_string()),
                    ("lon", lon.to_string()),
                    ("radius", DISCOVERY_RADIUS_KM.to_string()),
                    ("limit", DISCOVERY_LIMIT.to_string()),
                ],
            )
            .await?;

        if rows.is_empty() {
            return Err(WeatherError::NoStations);
        }

        let ids: Vec<String> = rows.into_iter().map(|row| row.id).collect();
        info!(stations = ?ids, "discovered Meteostat stations");
        Ok(ids)
    }

    /// Daily rows for one station.
    pub async fn station_daily(
        &self,
        station: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRow>, WeatherError> {
        self.get_rows(
            "stations/daily",
            &[
                ("station", station.to_string()),
                ("start", start.to_string()),
                ("end", end.to_string()),
            ],
        )
        .await
    }

    /// Hourly rows for one station, in Malta local time.
    pub async fn station_hourly(
        &self,
        station: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HourlyRow>, WeatherError> {
        self.get_rows(
            "stations/hourly",
            &[
                ("station", station.to_string()),
                ("start", start.to_string()),
                ("end", end.to_string()),
                ("tz", MALTA_TZ.to_string()),
            ],
        )
        .await
    }

    /// GET an endpoint and unwrap its `data` rows.
    async fn get_rows<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self.http.get(&url).query(query).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(WeatherError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(WeatherError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| WeatherError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            })?;

        Ok(envelope.into_rows())
    }
}

impl WeatherGateway for MeteostatClient {
    async fn daily(&self, date: NaiveDate) -> Result<Option<DailyWeather>, WeatherError> {
        let stations = self.stations().await?;
        let per_station = try_join_all(
            stations
                .iter()
                .map(|station| self.station_daily(station, date, date)),
        )
        .await?;

        let day = aggregate_daily(date, &per_station);
        debug!(%date, stations = stations.len(), found = day.is_some(), "fetched daily weather");
        Ok(day)
    }

    async fn hourly(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Option<HourlyWeather>, WeatherError> {
        if start > end {
            return Err(WeatherError::InvalidQuery(format!(
                "window starts ({start}) after it ends ({end})"
            )));
        }

        let stations = self.stations().await?;
        let per_station = try_join_all(
            stations
                .iter()
                .map(|station| self.station_hourly(station, start.date(), end.date())),
        )
        .await?;

        let window = aggregate_hourly(start, end, &per_station)?;
        debug!(
            %start,
            %end,
            stations = stations.len(),
            found = window.is_some(),
            "fetched hourly weather"
        );
        Ok(window)
    }
}
