//! Robinson pseudo-cylindrical projection.
//!
//! Uses the standard 5° tables of parallel length and parallel distance
//! with linear interpolation between nodes. Planar units are on the unit
//! sphere.

use crate::{wrap_longitude, MapProjection};

/// Parallel length factor at 0°, 5°, ... 90°.
const PLEN: [f64; 19] = [
    1.0000, 0.9986, 0.9954, 0.9900, 0.9822, 0.9730, 0.9600, 0.9427, 0.9216, 0.8962, 0.8679,
    0.8350, 0.7986, 0.7597, 0.7186, 0.6732, 0.6213, 0.5722, 0.5322,
];

/// Parallel distance from the equator at 0°, 5°, ... 90°.
const PDFE: [f64; 19] = [
    0.0000, 0.0620, 0.1240, 0.1860, 0.2480, 0.3100, 0.3720, 0.4340, 0.4958, 0.5571, 0.6176,
    0.6769, 0.7346, 0.7903, 0.8435, 0.8936, 0.9394, 0.9761, 1.0000,
];

const X_SCALE: f64 = 0.8487;
const Y_SCALE: f64 = 1.3523;
const STEP: f64 = 5.0;
const EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Robinson {
    /// Central meridian in degrees
    pub central_longitude: f64,
}

impl Robinson {
    pub fn new(central_longitude: f64) -> Self {
        Self { central_longitude }
    }
}

/// Table node index and fraction for an absolute latitude.
fn node(lat_abs: f64) -> (usize, f64) {
    let pos = (lat_abs.min(90.0) / STEP).max(0.0);
    let idx = (pos.floor() as usize).min(PLEN.len() - 2);
    (idx, pos - idx as f64)
}

fn lerp(table: &[f64; 19], idx: usize, frac: f64) -> f64 {
    table[idx] + (table[idx + 1] - table[idx]) * frac
}

impl MapProjection for Robinson {
    fn name(&self) -> &'static str {
        "robinson"
    }

    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (idx, frac) = node(lat.abs());
        let dlon = wrap_longitude(lon, self.central_longitude).to_radians();
        let x = X_SCALE * lerp(&PLEN, idx, frac) * dlon;
        let y = Y_SCALE * lerp(&PDFE, idx, frac) * lat.signum();
        (x, y)
    }

    fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let yn = y.abs() / Y_SCALE;
        if yn > 1.0 + EPS {
            return None;
        }
        let yn = yn.min(1.0);

        // PDFE is strictly increasing, so the segment is unique
        let idx = PDFE
            .windows(2)
            .position(|w| yn <= w[1])
            .unwrap_or(PDFE.len() - 2);
        let frac = (yn - PDFE[idx]) / (PDFE[idx + 1] - PDFE[idx]);
        let lat = (idx as f64 + frac) * STEP * y.signum();

        let dlon = (x / (X_SCALE * lerp(&PLEN, idx, frac))).to_degrees();
        if dlon.abs() > 180.0 + EPS {
            return None;
        }
        Some((dlon + self.central_longitude, lat))
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        let half_width = X_SCALE * std::f64::consts::PI;
        (-half_width, -Y_SCALE, half_width, Y_SCALE)
    }
}
