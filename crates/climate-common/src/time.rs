//! Time-axis encoding used by the model output.
//!
//! The model writes its time coordinate as `year * 10000 + 716`, i.e. a
//! `YYYYMMDD`-style number pinned to July 16th of each model year. Lookups
//! along the time axis must use exactly this value.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// First model year accepted by year-based lookups.
pub const MIN_YEAR: i64 = 1;

/// Last model year accepted by year-based lookups.
pub const MAX_YEAR: i64 = 999;

const YEAR_SCALE: f64 = 10000.0;
const MID_YEAR_SUFFIX: f64 = 716.0;

/// A value on the time axis of a temperature series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeKey(f64);

impl TimeKey {
    /// Wrap a raw time coordinate as read from a file.
    pub fn new(raw: f64) -> Self {
        Self(raw)
    }

    /// Encode a model year as its time key.
    pub fn from_year(year: i64) -> Self {
        Self(year as f64 * YEAR_SCALE + MID_YEAR_SUFFIX)
    }

    /// The raw coordinate value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// The model year this key falls in (`round(key / 10000)`).
    pub fn year(&self) -> i64 {
        (self.0 / YEAR_SCALE).round() as i64
    }
}

impl PartialEq for TimeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for TimeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<f64> for TimeKey {
    fn from(raw: f64) -> Self {
        Self::new(raw)
    }
}
