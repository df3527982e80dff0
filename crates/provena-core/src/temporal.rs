//! # Temporal Types
//!
//! Defines `Timestamp`, a UTC-only timestamp truncated to seconds
//! precision. Metadata documents are canonicalized and digested, so local
//! timezone offsets or sub-second noise would produce different canonical
//! bytes for the same instant and break content-addressed integrity.
//!
//! Strict parsing accepts only the `Z` suffix. A lenient parser exists for
//! ingesting external sensor records and ledger responses; its output is
//! still UTC at seconds precision.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// From a unix-epoch seconds value, as returned by the ledger's
    /// registration-date field.
    pub fn from_unix_seconds(secs: i64) -> Result<Self, ValidationError> {
        DateTime::<Utc>::from_timestamp(secs, 0)
            .map(Self)
            .ok_or_else(|| {
                ValidationError::new("timestamp", format!("unix seconds out of range: {secs}"))
            })
    }

    /// Parse from an RFC 3339 string, rejecting non-UTC offsets.
    ///
    /// Only the `Z` suffix is accepted. Explicit offsets, even `+00:00`,
    /// are rejected so canonical byte representations stay deterministic.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !s.ends_with('Z') {
            return Err(ValidationError::new(
                "timestamp",
                format!("must use Z suffix (UTC only), got {s:?}"),
            ));
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            ValidationError::new("timestamp", format!("invalid RFC 3339 value {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Parse from an RFC 3339 string, accepting any offset and converting
    /// to UTC. For ingesting external sensor records; digest paths should
    /// use [`Timestamp::parse`].
    pub fn parse_lenient(s: &str) -> Result<Self, ValidationError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| {
            ValidationError::new("timestamp", format!("invalid RFC 3339 value {s:?}: {e}"))
        })?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// ISO8601 rendering: `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Unix-epoch seconds.
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
