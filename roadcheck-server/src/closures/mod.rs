//! Full road closure directory.
//!
//! Closures come from the Government of Malta Geohub "Full Road Closure"
//! feature service, exported as ArcGIS JSON. Each closure names a locality,
//! a street and an inclusive time window.

mod directory;
mod error;
mod record;
pub mod time;

pub use directory::ClosureDirectory;
pub use error::QueryError;
pub use record::{ClosureId, ClosureRecord, InvalidWindow};
pub use time::{QueryTime, localize_malta, parse_timestamp};
