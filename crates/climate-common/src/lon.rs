//! Longitude convention conversion.

/// Offset added after remapping so no remapped column lands exactly on ±180.
pub const LONGITUDE_OFFSET: f64 = 15.0 / 16.0;

/// Convert a longitude in the [0, 360) convention to the centered
/// [-180, 180) convention, shifted by [`LONGITUDE_OFFSET`].
///
/// `rem_euclid` keeps the result non-negative for negative dividends,
/// matching floored modulo.
pub fn remap_longitude(lon: f64) -> f64 {
    (lon - 180.0).rem_euclid(360.0) - 180.0 + LONGITUDE_OFFSET
}
