//! Meteostat JSON API response types.
//!
//! Only the fields the crate reads are modelled; everything else in the
//! responses is ignored.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

/// Envelope shared by every Meteostat endpoint.
///
/// `data` is `null` or absent when a station has nothing for the
/// requested range.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<Vec<T>>,
}

impl<T> Envelope<T> {
    pub fn into_rows(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

/// A weather station from `/stations/nearby`.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRow {
    pub id: String,

    /// Station name by language code, e.g. `{"en": "Luqa"}`
    #[serde(default)]
    pub name: HashMap<String, String>,

    /// Distance from the search point in metres
    #[serde(default)]
    pub distance: Option<f64>,
}

/// One row from `/stations/daily`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyRow {
    pub date: NaiveDate,

    /// Precipitation in millimetres
    pub prcp: Option<f64>,
}

/// One row from `/stations/hourly`.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyRow {
    /// Local time as "YYYY-MM-DD HH:MM:SS"
    pub time: String,

    /// Precipitation in millimetres
    pub prcp: Option<f64>,
}
