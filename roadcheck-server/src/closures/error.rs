//! Closure query error types.

use chrono::NaiveDateTime;

/// Errors from a closure query's input.
///
/// A query that simply matches nothing is not an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Timestamp text is not ISO 8601
    #[error("invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp { input: String, reason: String },

    /// Local time skipped when Malta clocks go forward
    #[error("{0} does not exist in Malta local time (clocks go forward)")]
    NonexistentLocalTime(NaiveDateTime),

    /// Local time that occurs twice when Malta clocks go back
    #[error("{0} is ambiguous in Malta local time (clocks go back)")]
    AmbiguousLocalTime(NaiveDateTime),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn error_display() {
        let err = QueryError::InvalidTimestamp {
            input: "yesterday".into(),
            reason: "not ISO 8601".into(),
        };
        assert_eq!(err.to_string(), "invalid timestamp \"yesterday\": not ISO 8601");

        let local = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let err = QueryError::NonexistentLocalTime(local);
        assert_eq!(
            err.to_string(),
            "2024-03-31 02:30:00 does not exist in Malta local time (clocks go forward)"
        );
    }
}
