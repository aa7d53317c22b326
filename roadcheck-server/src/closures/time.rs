//! Timestamp parsing in Malta civil time.
//!
//! Dates in news and police reports are Malta local time and usually carry
//! no offset. Such timestamps are localized to `Europe/Malta`, honouring
//! daylight saving. Local times that fall in the spring-forward gap or the
//! autumn overlap are rejected rather than guessed.

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Utc,
};
use chrono_tz::Europe::Malta;
use tracing::warn;

use super::error::QueryError;

/// Formats with an explicit offset, tried in order.
const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

/// Formats without an offset, tried in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The point in time a closure query asks about.
///
/// Accepts ISO 8601 text, a naive date-time (taken as Malta local time) or
/// an offset-aware date-time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTime {
    Text(String),
    Naive(NaiveDateTime),
    Aware(DateTime<FixedOffset>),
}

impl QueryTime {
    /// Resolve to an absolute instant.
    pub fn resolve(&self) -> Result<DateTime<FixedOffset>, QueryError> {
        match self {
            QueryTime::Text(text) => parse_timestamp(text),
            QueryTime::Naive(local) => localize_malta(*local),
            QueryTime::Aware(instant) => Ok(*instant),
        }
    }
}

impl From<&str> for QueryTime {
    fn from(text: &str) -> Self {
        QueryTime::Text(text.to_string())
    }
}

impl From<String> for QueryTime {
    fn from(text: String) -> Self {
        QueryTime::Text(text)
    }
}

impl From<NaiveDateTime> for QueryTime {
    fn from(local: NaiveDateTime) -> Self {
        QueryTime::Naive(local)
    }
}

impl From<DateTime<FixedOffset>> for QueryTime {
    fn from(instant: DateTime<FixedOffset>) -> Self {
        QueryTime::Aware(instant)
    }
}

impl From<DateTime<Utc>> for QueryTime {
    fn from(instant: DateTime<Utc>) -> Self {
        QueryTime::Aware(instant.fixed_offset())
    }
}

/// Parse ISO 8601 text into an instant.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]`, optionally
/// followed by `Z` or `±HH:MM`. Text without an offset is Malta local time;
/// a bare date means local midnight.
///
/// # Examples
///
/// ```
/// use roadcheck_server::closures::parse_timestamp;
///
/// let winter = parse_timestamp("2024-01-10T12:00").unwrap();
/// assert_eq!(winter.to_rfc3339(), "2024-01-10T12:00:00+01:00");
///
/// let summer = parse_timestamp("2024-07-10 12:00:00").unwrap();
/// assert_eq!(summer.to_rfc3339(), "2024-07-10T12:00:00+02:00");
///
/// let utc = parse_timestamp("2024-07-10T10:00:00Z").unwrap();
/// assert_eq!(utc, summer);
///
/// assert!(parse_timestamp("10/07/2024").is_err());
/// ```
pub fn parse_timestamp(text: &str) -> Result<DateTime<FixedOffset>, QueryError> {
    let text = text.trim();

    if let Some(instant) = parse_aware(text) {
        return Ok(instant);
    }

    let local = parse_naive(text).ok_or_else(|| QueryError::InvalidTimestamp {
        input: text.to_string(),
        reason: "expected ISO 8601 date or date-time".to_string(),
    })?;

    localize_malta(local)
}

/// Attach the Malta offset in force at `local`.
pub fn localize_malta(local: NaiveDateTime) -> Result<DateTime<FixedOffset>, QueryError> {
    match Malta.from_local_datetime(&local) {
        LocalResult::Single(instant) => Ok(instant.fixed_offset()),
        LocalResult::Ambiguous(_, _) => {
            warn!(%local, "ambiguous Malta local time");
            Err(QueryError::AmbiguousLocalTime(local))
        }
        LocalResult::None => {
            warn!(%local, "nonexistent Malta local time");
            Err(QueryError::NonexistentLocalTime(local))
        }
    }
}

fn parse_aware(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = match text.strip_suffix(['Z', 'z']) {
        Some(rest) => format!("{rest}+00:00"),
        None => text.to_string(),
    };

    AWARE_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(&text, format).ok())
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
