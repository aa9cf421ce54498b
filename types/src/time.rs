//! Timestamp type and the approximate calendar used for yearly resets.
//!
//! Timestamps are Unix epoch seconds (UTC). Years are fixed 365-day buckets
//! counted from 1970: leap days are ignored, so the year boundary drifts
//! against the Gregorian calendar by roughly one day every four years.
//! Reset timing depends on this exact arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds in one bucket of the approximate calendar.
pub const SECS_PER_YEAR: u64 = 365 * 24 * 3600;

/// Year of timestamp zero.
pub const EPOCH_YEAR: u64 = 1970;

/// A Unix timestamp in seconds since epoch (UTC).
///
/// Zero doubles as "never set" in persisted accrual state.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    ///
    /// Never returns the epoch: zero marks an unset checkpoint, so a clock
    /// at or before 1970 reads as one second past it.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(secs.max(1))
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }

    /// Seconds from `self` to `later`, or `None` if `later` is earlier.
    pub fn checked_elapsed_until(&self, later: Timestamp) -> Option<u64> {
        later.0.checked_sub(self.0)
    }

    /// The approximate calendar year containing this timestamp.
    pub fn calendar_year(&self) -> Year {
        Year(self.0 / SECS_PER_YEAR + EPOCH_YEAR)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// A year of the approximate 365-day calendar.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Year(u64);

impl Year {
    pub fn new(year: u64) -> Self {
        Self(year)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// First timestamp that falls in this year.
    pub fn start(&self) -> Timestamp {
        Timestamp(self.0.saturating_sub(EPOCH_YEAR).saturating_mul(SECS_PER_YEAR))
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
