//! Closure lookup by locality, street and time.

use std::path::Path;

use chrono::{DateTime, FixedOffset};
use tracing::{debug, info};

use crate::dataset::{self, DatasetError};
use crate::names::{normalize, normalize_street};

use super::error::QueryError;
use super::record::{ClosureRecord, parse_features};
use super::time::QueryTime;

/// Normalized inputs of a closure query.
struct ClosureQuery {
    locality: String,
    street: String,
    instant: DateTime<FixedOffset>,
}

impl ClosureQuery {
    fn new(locality: &str, street: &str, at: QueryTime) -> Result<Self, QueryError> {
        Ok(Self {
            locality: normalize(locality),
            street: normalize_street(street),
            instant: at.resolve()?,
        })
    }

    fn matches(&self, record: &ClosureRecord) -> bool {
        record.matches(&self.locality, &self.street, self.instant)
    }
}

/// Immutable list of full road closures.
#[derive(Debug, Clone, Default)]
pub struct ClosureDirectory {
    records: Vec<ClosureRecord>,
}

impl ClosureDirectory {
    /// Build a directory from already-validated records.
    pub fn from_records(records: Vec<ClosureRecord>) -> Self {
        Self { records }
    }

    /// Load the Geohub closure export at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = dataset::read_to_string(path)?;
        let directory = Self::from_json(&json)?;
        info!(path = %path.display(), closures = directory.len(), "loaded road closures");
        Ok(directory)
    }

    /// Parse an ArcGIS feature-set document.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        parse_features(json).map(Self::from_records)
    }

    /// Whether `street` in `locality` was closed at `at`.
    ///
    /// Names match by containment after normalization, so "Mosta" and
    /// "Triq l-Gharusa" match a closure on "Triq l-Għarusa tal-Mosta" in
    /// "Il-Mosta". The closure window includes both of its ends.
    ///
    /// # Errors
    ///
    /// Fails if `at` is unparseable text, or a Malta local time that is
    /// skipped or repeated by a daylight saving change.
    pub fn had_closure(
        &self,
        locality: &str,
        street: &str,
        at: impl Into<QueryTime>,
    ) -> Result<bool, QueryError> {
        let query = ClosureQuery::new(locality, street, at.into())?;
        let hit = self.records.iter().find(|record| query.matches(record));

        debug!(
            locality = %query.locality,
            street = %query.street,
            instant = %query.instant,
            closure = hit.map(|r| r.id().as_str()),
            "closure lookup"
        );
        Ok(hit.is_some())
    }

    /// Every closure matching the query, in table order.
    pub fn closures_at(
        &self,
        locality: &str,
        street: &str,
        at: impl Into<QueryTime>,
    ) -> Result<Vec<&ClosureRecord>, QueryError> {
        let query = ClosureQuery::new(locality, street, at.into())?;
        Ok(self
            .records
            .iter()
            .filter(|record| query.matches(record))
            .collect())
    }

    /// All records, in table order.
    pub fn records(&self) -> &[ClosureRecord] {
        &self.records
    }

    /// Number of closures.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the directory has no closures.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::closures::ClosureId;
    use chrono::{Duration, TimeZone, Utc};
    use proptest::prelude::*;

    proptest! {
        /// Membership agrees with the inclusive window for any instant.
        #[test]
        fn membership_matches_window(
            start in 1_600_000_000i64..1_800_000_000,
            length in 0i64..(30 * 24 * 3600),
            probe in -3600i64..(31 * 24 * 3600),
        ) {
            let from = Utc.timestamp_opt(start, 0).unwrap().fixed_offset();
            let to = from + Duration::seconds(length);
            let record = ClosureRecord::new("Il-Mosta", "Triq l-Għarusa", from, to, ClosureId::new("p"))
                .unwrap();
            let dir = ClosureDirectory::from_records(vec![record]);

            let instant = from + Duration::seconds(probe);
            let expected = probe >= 0 && probe <= length;
            prop_assert_eq!(dir.had_closure("Mosta", "Gharusa", instant).unwrap(), expected);
        }
    }
}
