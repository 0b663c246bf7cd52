//! Equirectangular projection.

use crate::{wrap_longitude, MapProjection};

/// Plate Carrée: longitude and latitude used directly as planar
/// coordinates, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlateCarree {
    /// Central meridian in degrees
    pub central_longitude: f64,
}

impl PlateCarree {
    pub fn new(central_longitude: f64) -> Self {
        Self { central_longitude }
    }
}

impl MapProjection for PlateCarree {
    fn name(&self) -> &'static str {
        "platecarree"
    }

    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        (wrap_longitude(lon, self.central_longitude), lat)
    }

    fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !(-180.0..=180.0).contains(&x) || !(-90.0..=90.0).contains(&y) {
            return None;
        }
        Some((x + self.central_longitude, y))
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (-180.0, -90.0, 180.0, 90.0)
    }
}
