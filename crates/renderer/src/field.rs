//! A grid with ascending axes, for sampling and contouring.

use climate_frame::UnstackedGrid;
use ndarray::{s, Array2, ArrayView2, Axis};

use crate::contour::{Contour, Point};

/// Gridded values whose row (latitude) and column (longitude) labels both
/// ascend. Built from an [`UnstackedGrid`], whose rows keep input order.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedField {
    lons: Vec<f64>,
    lats: Vec<f64>,
    values: Array2<f64>,
}

impl SortedField {
    pub fn from_grid(grid: &UnstackedGrid) -> Self {
        let mut order: Vec<usize> = (0..grid.height()).collect();
        order.sort_by(|&a, &b| grid.latitudes()[a].total_cmp(&grid.latitudes()[b]));

        Self {
            lons: grid.longitudes().to_vec(),
            lats: order.iter().map(|&r| grid.latitudes()[r]).collect(),
            values: grid.values().select(Axis(0), &order),
        }
    }

    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    /// Values as a `(lat, lon)` array.
    pub fn grid(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Row-major values. `select` always yields a standard-layout array.
    pub fn values(&self) -> &[f64] {
        self.values.as_slice().unwrap_or(&[])
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    fn lon_span(&self) -> Option<(f64, f64)> {
        Some((*self.lons.first()?, *self.lons.last()?))
    }

    /// Bilinear value at `(lon, lat)`, or `None` outside the hull or next
    /// to a `NaN` cell. Longitudes are tried modulo 360.
    pub fn sample(&self, lon: f64, lat: f64) -> Option<f64> {
        let (lon_min, lon_max) = self.lon_span()?;
        let lon = if lon < lon_min {
            lon + 360.0
        } else if lon > lon_max {
            lon - 360.0
        } else {
            lon
        };

        let (i, tx) = locate(&self.lons, lon)?;
        let (j, ty) = locate(&self.lats, lat)?;
        let cell = self.values.slice(s![j..j + 2, i..i + 2]);

        let top = cell[[0, 0]] + (cell[[0, 1]] - cell[[0, 0]]) * tx;
        let bottom = cell[[1, 0]] + (cell[[1, 1]] - cell[[1, 0]]) * tx;
        let value = top + (bottom - top) * ty;
        (!value.is_nan()).then_some(value)
    }

    /// Convert a contour from grid index space to `(lon, lat)`.
    pub fn to_geographic(&self, contour: Contour) -> Contour {
        Contour {
            points: contour
                .points
                .into_iter()
                .map(|p| Point::new(interpolate_label(&self.lons, p.x), interpolate_label(&self.lats, p.y)))
                .collect(),
            ..contour
        }
    }
}

/// Lower cell index and fraction of `value` along ascending `axis`.
fn locate(axis: &[f64], value: f64) -> Option<(usize, f64)> {
    if axis.len() < 2 || value < axis[0] || value > axis[axis.len() - 1] {
        return None;
    }
    let upper = axis.partition_point(|&a| a <= value).min(axis.len() - 1);
    let i = upper.saturating_sub(1);
    let span = axis[i + 1] - axis[i];
    Some((i, if span > 0.0 { (value - axis[i]) / span } else { 0.0 }))
}

/// Label at fractional index `pos`.
fn interpolate_label(axis: &[f64], pos: f64) -> f64 {
    let last = axis.len().saturating_sub(1);
    let i = (pos.floor().max(0.0) as usize).min(last.saturating_sub(1));
    match axis.get(i + 1) {
        Some(&next) => axis[i] + (next - axis[i]) * (pos - i as f64),
        None => axis.get(i).copied().unwrap_or(f64::NAN),
    }
}
