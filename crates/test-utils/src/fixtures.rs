//! Common test fixtures for climate-maps tests.
//!
//! This module provides pre-defined coordinates and values that represent
//! common scenarios in model output processing.

/// Common coordinate sets.
pub mod coords {
    /// Two latitudes straddling the equator
    pub const TWO_LATS: [f64; 2] = [-10.0, 10.0];

    /// Greenwich and the antimeridian, [0, 360) convention
    pub const TWO_LONS: [f64; 2] = [0.0, 180.0];

    /// Coarse global latitudes (30 degree spacing, poles excluded)
    pub const COARSE_LATS: [f64; 5] = [-60.0, -30.0, 0.0, 30.0, 60.0];

    /// Coarse global longitudes (45 degree spacing)
    pub const COARSE_LONS: [f64; 8] = [0.0, 45.0, 90.0, 135.0, 180.0, 225.0, 270.0, 315.0];
}

/// Common year values.
pub mod years {
    /// First valid model year
    pub const FIRST: i64 = 1;

    /// Last valid model year
    pub const LAST: i64 = 999;

    /// Years rejected by year-based lookups
    pub const OUT_OF_RANGE: [i64; 4] = [-1, 0, 1000, 2024];
}

/// Common value ranges.
pub mod values {
    /// Plausible surface temperature range in Kelvin (vmin, vmax)
    pub const KELVIN_RANGE: (f64, f64) = (220.0, 310.0);

    /// Typical solar constant in W/m²
    pub const SOLAR_CONSTANT: f64 = 1361.0;
}
