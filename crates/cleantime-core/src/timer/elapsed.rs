//! Clean-time calculation.
//!
//! A pure function of two absolute instants and a per-day rate. Because
//! nothing is accumulated, callers may sample as rarely as they like without
//! drifting.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MS_PER_SECOND: u64 = 1_000;
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Daily spend assumed when nothing is configured (currency units).
pub const DEFAULT_RATE_PER_DAY: u64 = 50;

/// Elapsed time since the recovery start, split into display units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanTime {
    pub days: u64,
    /// 0..=23
    pub hours: u64,
    /// 0..=59
    pub minutes: u64,
    /// 0..=59
    pub seconds: u64,
    /// Whole days elapsed times the per-day rate.
    pub amount_accrued: u64,
}

impl CleanTime {
    /// Elapsed whole seconds represented by the unit fields.
    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

/// Compute clean time between `start` and `sample`.
///
/// A sample taken before the start (clock skew, a start date picked in the
/// future) yields all zeroes.
pub fn compute(start: DateTime<Utc>, sample: DateTime<Utc>, rate_per_day: u64) -> CleanTime {
    let total_ms = (sample - start).num_milliseconds().max(0) as u64;
    let days = total_ms / MS_PER_DAY;
    CleanTime {
        days,
        hours: (total_ms % MS_PER_DAY) / MS_PER_HOUR,
        minutes: (total_ms % MS_PER_HOUR) / MS_PER_MINUTE,
        seconds: (total_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        amount_accrued: days.saturating_mul(rate_per_day),
    }
}
