//! # Temporal Types
//!
//! UTC-only timestamp type for the reconciliation engine. All timestamps
//! are stored in UTC with second-level precision and a `Z` suffix in
//! serialized form.
//!
//! ## Design Decision
//!
//! Issuance, verification, and expiration dates originate from ledger
//! events emitted by institutions in different local time zones. To keep
//! status resolution deterministic, all comparisons happen in UTC; local
//! time conversion is a presentation concern handled outside this
//! workspace.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A UTC timestamp with second-level precision.
///
/// Serializes to ISO 8601 format with `Z` suffix (e.g., `2026-01-15T12:00:00Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current UTC time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Create a timestamp from UNIX seconds, as ledger events encode dates.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimestamp`] if the value is out
    /// of the representable range.
    pub fn from_unix_seconds(secs: i64) -> Result<Self, ValidationError> {
        match Utc.timestamp_opt(secs, 0) {
            chrono::LocalResult::Single(dt) => Ok(Self(dt)),
            _ => Err(ValidationError::InvalidTimestamp {
                value: secs.to_string(),
                reason: "out of range for UNIX seconds".to_string(),
            }),
        }
    }

    /// Access the underlying `chrono::DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Return the timestamp as an ISO 8601 string with Z suffix,
    /// truncated to seconds.
    pub fn to_canonical_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}
