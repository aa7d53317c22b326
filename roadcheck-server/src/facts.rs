//! The query surface: every fact the crate can check, in one place.
//!
//! [`RoadFacts`] is built once at startup from the static datasets and a
//! weather gateway, then shared read-only. Nothing here is a global, so
//! tests build their own from fixture data.

use chrono::NaiveDate;
use tracing::info;

use crate::cameras::{CameraDirectory, CameraRecord};
use crate::closures::{ClosureDirectory, QueryError, QueryTime};
use crate::config::DataConfig;
use crate::dataset::DatasetError;
use crate::weather::{self, WeatherError, WeatherGateway};

/// Loaded datasets plus a weather source.
pub struct RoadFacts<G> {
    cameras: CameraDirectory,
    closures: ClosureDirectory,
    weather: G,
}

impl<G: WeatherGateway> RoadFacts<G> {
    /// Assemble from already-built parts.
    pub fn new(cameras: CameraDirectory, closures: ClosureDirectory, weather: G) -> Self {
        Self {
            cameras,
            closures,
            weather,
        }
    }

    /// Load both datasets named by `config`.
    ///
    /// Fails if either dataset is unreadable or has a malformed record.
    pub fn load(config: &DataConfig, weather: G) -> Result<Self, DatasetError> {
        let cameras = CameraDirectory::load(&config.cameras_path)?;
        let closures = ClosureDirectory::load(&config.closures_path)?;
        info!(
            cameras = cameras.len(),
            closures = closures.len(),
            "road facts ready"
        );
        Ok(Self::new(cameras, closures, weather))
    }

    /// Speed cameras on `street`.
    pub fn find_cameras(&self, street: &str) -> Vec<&CameraRecord> {
        self.cameras.find_cameras(street)
    }

    /// Whether `street` had a speed camera by `year`.
    pub fn had_camera(&self, street: &str, year: i32) -> bool {
        self.cameras.had_camera(street, year)
    }

    /// Whether `street` in `locality` was fully closed at `at`.
    pub fn had_closure(
        &self,
        locality: &str,
        street: &str,
        at: impl Into<QueryTime>,
    ) -> Result<bool, QueryError> {
        self.closures.had_closure(locality, street, at)
    }

    /// Whether it rained in Malta on `date`.
    pub async fn rained_on(&self, date: NaiveDate) -> Result<bool, WeatherError> {
        weather::rained_on(&self.weather, date).await
    }

    /// Whether it rained in the `lookback_hours` up to `hour`:00 on `date`.
    pub async fn rained_before(
        &self,
        date: NaiveDate,
        hour: u32,
        lookback_hours: u32,
    ) -> Result<bool, WeatherError> {
        weather::rained_before(&self.weather, date, hour, lookback_hours).await
    }

    pub fn cameras(&self) -> &CameraDirectory {
        &self.cameras
    }

    pub fn closures(&self) -> &ClosureDirectory {
        &self.closures
    }

    pub fn weather(&self) -> &G {
        &self.weather
    }
}
