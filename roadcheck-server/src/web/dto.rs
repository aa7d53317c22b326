//! Data transfer objects for web requests and responses.

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::cameras::CameraRecord;
use crate::closures::ClosureRecord;

/// Request to list cameras on a street.
#[derive(Debug, Deserialize)]
pub struct CameraSearchRequest {
    /// Street name, in any spelling
    pub street: String,
}

/// A camera in search results.
#[derive(Debug, Serialize)]
pub struct CameraResult {
    pub street_en: String,
    pub street_mt: String,
    pub street_common: String,
    pub locality: String,
    pub installation_year: i32,
}

impl From<&CameraRecord> for CameraResult {
    fn from(record: &CameraRecord) -> Self {
        Self {
            street_en: record.street_en.clone(),
            street_mt: record.street_mt.clone(),
            street_common: record.street_common.clone(),
            locality: record.locality.clone(),
            installation_year: record.installation_year,
        }
    }
}

/// Response listing cameras.
#[derive(Debug, Serialize)]
pub struct CameraListResponse {
    pub cameras: Vec<CameraResult>,
}

/// Request to check whether a street had a camera by a year.
#[derive(Debug, Deserialize)]
pub struct CameraCheckRequest {
    pub street: String,
    pub year: i32,
}

/// Response to a camera check.
#[derive(Debug, Serialize)]
pub struct CameraCheckResponse {
    pub had_camera: bool,

    /// Earliest installation year on the street, if it has any camera
    pub earliest_installation: Option<i32>,
}

/// Request to check whether a street was closed at a time.
#[derive(Debug, Deserialize)]
pub struct ClosureCheckRequest {
    pub locality: String,
    pub street: String,

    /// ISO 8601 timestamp; Malta local time when it has no offset
    pub at: String,
}

/// A closure in check results.
#[derive(Debug, Serialize)]
pub struct ClosureResult {
    pub id: String,
    pub locality_name: String,
    pub street_name: String,
    pub from: DateTime<FixedOffset>,
    pub to: DateTime<FixedOffset>,
}

impl From<&ClosureRecord> for ClosureResult {
    fn from(record: &ClosureRecord) -> Self {
        Self {
            id: record.id().to_string(),
            locality_name: record.locality_name().to_string(),
            street_name: record.street_name().to_string(),
            from: record.from_date(),
            to: record.to_date(),
        }
    }
}

/// Response to a closure check.
#[derive(Debug, Serialize)]
pub struct ClosureCheckResponse {
    pub had_closure: bool,

    /// The instant that was checked, with its resolved offset
    pub at: DateTime<FixedOffset>,

    /// Every closure active at `at`
    pub closures: Vec<ClosureResult>,
}

/// Request to check for rain on a day.
#[derive(Debug, Deserialize)]
pub struct RainOnRequest {
    pub date: NaiveDate,
}

/// Request to check for rain in the hours before a time.
#[derive(Debug, Deserialize)]
pub struct RainBeforeRequest {
    pub date: NaiveDate,

    /// Hour of day, 0-23
    pub hour: u32,

    pub lookback_hours: u32,
}

/// Response to a rain check.
#[derive(Debug, Serialize)]
pub struct RainResponse {
    pub rained: bool,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closures::ClosureId;

    #[test]
    fn camera_result_from_record() {
        let record = CameraRecord::new("Marsa Road", "Triq il-Marsa", "", "Marsa", 2010);
        let json = serde_json::to_value(CameraResult::from(&record)).unwrap();

        assert_eq!(json["street_en"], "MARSA ROAD");
        assert_eq!(json["street_mt"], "TRIQ ILMARSA");
        assert_eq!(json["installation_year"], 2010);
    }

    #[test]
    fn closure_result_serializes_rfc3339() {
        let from = DateTime::parse_from_rfc3339("2024-03-01T08:00:00+01:00").unwrap();
        let to = DateTime::parse_from_rfc3339("2024-03-15T18:00:00+01:00").unwrap();
        let record =
            ClosureRecord::new("Il-Mosta", "Triq l-Għarusa", from, to, ClosureId::new("1001"))
                .unwrap();
        let json = serde_json::to_value(ClosureResult::from(&record)).unwrap();

        assert_eq!(json["id"], "1001");
        assert_eq!(json["from"], "2024-03-01T08:00:00+01:00");
        assert_eq!(json["street_name"], "TRIQ LGHARUSA");
    }

    #[test]
    fn rain_before_request_parses_query_values() {
        let req: RainBeforeRequest = serde_json::from_str(
            r#"{"date": "2024-01-05", "hour": 14, "lookback_hours": 3}"#,
        )
        .unwrap();
        assert_eq!(req.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(req.hour, 14);
    }
}
