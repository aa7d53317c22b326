//! Closure records and ArcGIS JSON parsing.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::dataset::DatasetError;
use crate::names::{fix_article_spacing, normalize};

use super::time::parse_timestamp;

/// Returned when a closure window ends before it starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("closure window ends ({to}) before it starts ({from})")]
pub struct InvalidWindow {
    from: DateTime<FixedOffset>,
    to: DateTime<FixedOffset>,
}

/// Geohub identifier of a closure (`rw_id`).
///
/// The feature service has used both numeric and text ids, so the id is
/// kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "RawId")]
pub struct ClosureId(String);

impl ClosureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClosureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for ClosureId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => ClosureId(text),
            RawId::Number(n) => ClosureId(n.to_string()),
        }
    }
}

/// A full road closure over an inclusive time window.
///
/// Names are stored normalized. `from_date <= to_date` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureRecord {
    locality_name: String,
    street_name: String,
    from_date: DateTime<FixedOffset>,
    to_date: DateTime<FixedOffset>,
    id: ClosureId,
}

impl ClosureRecord {
    /// Build a record from raw names, normalizing them.
    pub fn new(
        locality: &str,
        street: &str,
        from_date: DateTime<FixedOffset>,
        to_date: DateTime<FixedOffset>,
        id: ClosureId,
    ) -> Result<Self, InvalidWindow> {
        if to_date < from_date {
            return Err(InvalidWindow {
                from: from_date,
                to: to_date,
            });
        }

        Ok(Self {
            locality_name: normalize(locality),
            street_name: normalize(&fix_article_spacing(street)),
            from_date,
            to_date,
            id,
        })
    }

    /// Normalized locality name.
    pub fn locality_name(&self) -> &str {
        &self.locality_name
    }

    /// Normalized street name.
    pub fn street_name(&self) -> &str {
        &self.street_name
    }

    /// Start of the closure window.
    pub fn from_date(&self) -> DateTime<FixedOffset> {
        self.from_date
    }

    /// End of the closure window, never before [`Self::from_date`].
    pub fn to_date(&self) -> DateTime<FixedOffset> {
        self.to_date
    }

    pub fn id(&self) -> &ClosureId {
        &self.id
    }

    /// Whether `instant` lies in the closure window, both ends included.
    pub fn is_active_at(&self, instant: DateTime<FixedOffset>) -> bool {
        self.from_date <= instant && instant <= self.to_date
    }

    /// Whether this closure matches already-normalized names at `instant`.
    pub(super) fn matches(&self, locality: &str, street: &str, instant: DateTime<FixedOffset>) -> bool {
        self.locality_name.contains(locality)
            && self.street_name.contains(street)
            && self.is_active_at(instant)
    }
}

#[derive(Deserialize)]
struct FeatureSet {
    features: Vec<serde_json::Value>,
}

#[derive(Deserialize)]
struct Feature {
    attributes: Attributes,
}

#[derive(Deserialize)]
struct Attributes {
    #[serde(rename = "rw_LocalityName")]
    locality_name: String,
    #[serde(rename = "rw_StreetFullname")]
    street_fullname: String,
    #[serde(rename = "rw_DateFrom")]
    date_from: String,
    #[serde(rename = "rw_DateTo")]
    date_to: String,
    #[serde(rename = "rw_id")]
    id: ClosureId,
}

/// Parse every closure from an ArcGIS feature-set document.
///
/// Any feature with missing or null attributes, unparseable dates or an
/// inverted window fails the whole load.
pub(super) fn parse_features(json: &str) -> Result<Vec<ClosureRecord>, DatasetError> {
    let set: FeatureSet = serde_json::from_str(json)?;

    set.features
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            let feature: Feature = serde_json::from_value(value)
                .map_err(|e| DatasetError::invalid(index, e.to_string()))?;
            let attrs = feature.attributes;

            let from = parse_timestamp(&attrs.date_from)
                .map_err(|e| DatasetError::invalid(index, format!("rw_DateFrom: {e}")))?;
            let to = parse_timestamp(&attrs.date_to)
                .map_err(|e| DatasetError::invalid(index, format!("rw_DateTo: {e}")))?;

            ClosureRecord::new(
                &attrs.locality_name,
                &attrs.street_fullname,
                from,
                to,
                attrs.id,
            )
            .map_err(|e| DatasetError::invalid(index, e.to_string()))
        })
        .collect()
}
