//! Error types for climate data transformations.

use thiserror::Error;

use crate::TimeKey;

/// Result type alias using ClimateError.
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Primary error type for series transformations.
#[derive(Debug, Error, PartialEq)]
pub enum ClimateError {
    // === Validation Errors ===
    #[error("Year {year} is out of range (expected {min}..={max})")]
    YearOutOfRange { year: i64, min: i64, max: i64 },

    #[error("Rolling window must be at least 1, got {0}")]
    InvalidWindow(usize),

    // === Lookup Errors ===
    #[error("Time key not found: {0}")]
    TimeKeyNotFound(TimeKey),

    #[error("Duplicate entry for lat={lat}, lon={lon}; cannot reshape")]
    DuplicateCoordinate { lat: f64, lon: f64 },

    #[error("No baseline value for lat={lat}, lon={lon}")]
    MissingBaseline { lat: f64, lon: f64 },
}

impl ClimateError {
    /// Whether the error comes from caller input rather than missing data.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClimateError::YearOutOfRange { .. } | ClimateError::InvalidWindow(_)
        )
    }
}
