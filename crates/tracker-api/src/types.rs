//! Shared value types for the tracker domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! values that participate in comparisons and formatting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an RFC 3339 string (e.g. `"2024-12-31T23:59:59.000Z"`).
    ///
    /// Returns `None` when the string is not a valid RFC 3339 timestamp.
    /// Offsets other than UTC are normalised to UTC.
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(value)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trello_style_due_dates() {
        let ts = Timestamp::parse_rfc3339("2024-12-31T23:59:59.000Z").unwrap();
        assert_eq!(ts.as_datetime().to_rfc3339(), "2024-12-31T23:59:59+00:00");
    }

    #[test]
    fn normalises_offsets_to_utc() {
        let ts = Timestamp::parse_rfc3339("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(ts, Timestamp::parse_rfc3339("2024-01-01T00:00:00Z").unwrap());
    }

    #[test]
    fn wraps_and_displays_utc_datetimes() {
        let dt = DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let ts = Timestamp::from_utc(dt);
        assert_eq!(ts.as_datetime(), dt);
        assert_eq!(ts.to_string(), "2024-06-01T12:00:00+00:00");
    }

    #[test]
    fn rejects_non_rfc3339_input() {
        assert!(Timestamp::parse_rfc3339("2026-02-15").is_none());
        assert!(Timestamp::parse_rfc3339("").is_none());
    }
}
