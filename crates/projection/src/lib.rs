//! Map projections for global climate plots.
//!
//! Projections map geographic coordinates (longitude, latitude in degrees)
//! to a planar `(x, y)` space with `y` pointing north, and back. The
//! renderer fits each projection's [`MapProjection::bounds`] into a pixel
//! rectangle.

pub mod kind;
pub mod plate_carree;
pub mod robinson;

pub use kind::{ProjectionError, ProjectionKind};
pub use plate_carree::PlateCarree;
pub use robinson::Robinson;

/// Forward and inverse mapping between geographic and planar coordinates.
pub trait MapProjection: Send + Sync {
    /// Short lowercase name, e.g. `"robinson"`.
    fn name(&self) -> &'static str;

    /// Geographic to planar coordinates.
    fn project(&self, lon: f64, lat: f64) -> (f64, f64);

    /// Planar to geographic coordinates, or `None` outside the globe.
    fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)>;

    /// Planar extent of the whole globe as `(min_x, min_y, max_x, max_y)`.
    fn bounds(&self) -> (f64, f64, f64, f64);
}

/// Longitude relative to `central`, wrapped into [-180, 180).
pub fn wrap_longitude(lon: f64, central: f64) -> f64 {
    (lon - central + 180.0).rem_euclid(360.0) - 180.0
}
