//! Camera records and CSV parsing.

use std::io::Read;

use serde::Deserialize;

use crate::dataset::DatasetError;
use crate::names::normalize;

/// A single speed camera.
///
/// Name fields are stored normalized (see [`crate::names::normalize`]).
/// Empty cells in the source are kept as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraRecord {
    /// English street name, e.g. "MARSA ROAD"
    pub street_en: String,

    /// Maltese street name, e.g. "TRIQ ILMARSA"
    pub street_mt: String,

    /// Name in common use, when it differs from both official names
    pub street_common: String,

    /// Locality the camera is in
    pub locality: String,

    /// Year the camera was installed
    pub installation_year: i32,
}

impl CameraRecord {
    /// Build a record from raw (unnormalized) names.
    pub fn new(
        street_en: &str,
        street_mt: &str,
        street_common: &str,
        locality: &str,
        installation_year: i32,
    ) -> Self {
        Self {
            street_en: normalize(street_en),
            street_mt: normalize(street_mt),
            street_common: normalize(street_common),
            locality: normalize(locality),
            installation_year,
        }
    }

    /// The three street name fields a lookup is matched against.
    pub fn street_names(&self) -> [&str; 3] {
        [&self.street_en, &self.street_mt, &self.street_common]
    }
}

/// One CSV row as it appears on disk. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct CameraRow {
    street_en: String,
    street_mt: String,
    street_common: String,
    locality: String,
    installation_year: i32,
}

/// Parse every camera row from CSV with a header line.
///
/// Fails on the first malformed row; nothing is returned in that case.
pub(super) fn parse_csv<R: Read>(reader: R) -> Result<Vec<CameraRecord>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<CameraRow>()
        .map(|row| {
            let row = row?;
            Ok(CameraRecord::new(
                &row.street_en,
                &row.street_mt,
                &row.street_common,
                &row.locality,
                row.installation_year,
            ))
        })
        .collect()
}
