//! Weather lookups for Malta.
//!
//! Precipitation comes from Meteostat, aggregated across the weather
//! stations on the islands. The rest of the crate only depends on the
//! [`WeatherGateway`] contract; [`rain`] turns it into yes/no answers.
//!
//! Missing data is read as "no rain". Failures talking to the source are
//! errors and are never turned into "no rain".

mod client;
mod convert;
mod error;
mod gateway;
mod mock;
pub mod rain;
mod types;

pub use client::{MeteostatClient, MeteostatConfig};
pub use error::WeatherError;
pub use gateway::{DailyWeather, HourlyWeather, WeatherGateway};
pub use mock::StaticWeather;
pub use rain::{rained_before, rained_on};
pub use types::{DailyRow, HourlyRow, StationRow};
