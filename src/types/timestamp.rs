//! Timestamp data type implementation

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp data type (microseconds since Unix epoch, UTC)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timestamp {
    /// Microseconds since Unix epoch
    micros: i64,
}

impl Timestamp {
    /// Create a timestamp from milliseconds.
    ///
    /// Returns `None` if the instant does not fit in microseconds.
    pub fn from_millis(millis: i64) -> Option<Self> {
        millis.checked_mul(1000).map(|micros| Self { micros })
    }

    /// Create a timestamp from seconds.
    ///
    /// Returns `None` if the instant does not fit in microseconds.
    pub fn from_secs(secs: i64) -> Option<Self> {
        secs.checked_mul(1_000_000).map(|micros| Self { micros })
    }

    /// Get timestamp in microseconds
    pub fn as_micros(&self) -> i64 {
        self.micros
    }

    /// Convert to a UTC datetime.
    ///
    /// Returns `None` when the value is outside chrono's representable range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_micros(self.micros)
    }

    /// Calendar day (UTC) this instant falls on
    pub fn utc_date(&self) -> Option<NaiveDate> {
        self.to_datetime().map(|dt| dt.date_naive())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self {
            micros: dt.timestamp_micros(),
        }
    }
}
