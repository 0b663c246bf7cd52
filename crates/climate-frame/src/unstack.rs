//! Pivot a spatial slice into a latitude × longitude grid.

use std::collections::HashMap;

use climate_common::{remap_longitude, ClimateError, ClimateResult};
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::series::{coord_bits, distinct, TemperatureSlice};

/// A 2-D field with latitude rows and longitude columns.
///
/// Column labels are in the centered convention produced by
/// [`remap_longitude`] and sorted ascending. Row labels keep the order in
/// which latitudes first appeared in the source slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnstackedGrid {
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
    values: Array2<f64>,
}

impl UnstackedGrid {
    /// Row labels (degrees north).
    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    /// Column labels (degrees east, centered convention).
    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    /// Values as a `(lat, lon)` array.
    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.values.ncols()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get((row, col)).copied()
    }

    pub fn row(&self, row: usize) -> Option<ArrayView1<'_, f64>> {
        (row < self.height()).then(|| self.values.row(row))
    }

    /// Coordinate mesh: `(lon, lat)` for every cell, row-major.
    pub fn mesh(&self) -> Vec<(f64, f64)> {
        self.latitudes
            .iter()
            .flat_map(|&lat| self.longitudes.iter().map(move |&lon| (lon, lat)))
            .collect()
    }

    /// Finite minimum and maximum of the values, if any.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Pivot `slice` into a grid with latitude rows and longitude columns.
///
/// Cells missing from the slice are filled with 0. Longitudes are remapped
/// from [0, 360) to the centered convention and the columns re-sorted.
/// A repeated (lat, lon) pair is an error; `0.0` and `-0.0` name the same
/// coordinate.
pub fn unstack(slice: &TemperatureSlice) -> ClimateResult<UnstackedGrid> {
    let latitudes = slice.latitudes();
    let raw_longitudes = distinct(slice.iter().map(|c| c.lon));

    // Column order after remapping: sort source longitudes by their new label
    let mut columns: Vec<(f64, f64)> = raw_longitudes
        .iter()
        .map(|&lon| (lon, remap_longitude(lon)))
        .collect();
    columns.sort_by(|a, b| a.1.total_cmp(&b.1));

    let row_index: HashMap<u64, usize> = latitudes
        .iter()
        .enumerate()
        .map(|(i, &lat)| (coord_bits(lat), i))
        .collect();
    let col_index: HashMap<u64, usize> = columns
        .iter()
        .enumerate()
        .map(|(j, &(lon, _))| (coord_bits(lon), j))
        .collect();

    let shape = (latitudes.len(), columns.len());
    let mut values = Array2::<f64>::zeros(shape);
    let mut filled = Array2::from_elem(shape, false);

    for cell in slice.iter() {
        // Both lookups succeed: the label sets were built from these cells
        let (Some(&row), Some(&col)) = (
            row_index.get(&coord_bits(cell.lat)),
            col_index.get(&coord_bits(cell.lon)),
        ) else {
            continue;
        };
        if filled[[row, col]] {
            return Err(ClimateError::DuplicateCoordinate {
                lat: cell.lat,
                lon: cell.lon,
            });
        }
        filled[[row, col]] = true;
        values[[row, col]] = cell.value;
    }

    debug!(
        rows = shape.0,
        cols = shape.1,
        missing = filled.iter().filter(|f| !**f).count(),
        "Unstacked slice"
    );

    Ok(UnstackedGrid {
        latitudes,
        longitudes: columns.into_iter().map(|(_, remapped)| remapped).collect(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use climate_common::LONGITUDE_OFFSET;

    #[test]
    fn test_unstack_fills_missing_with_zero() {
        let mut slice = TemperatureSlice::new();
        slice.push(10.0, 0.0, 1.0);
        slice.push(-10.0, 90.0, 2.0);

        let grid = unstack(&slice).unwrap();
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.latitudes(), &[10.0, -10.0]);
        assert_eq!(grid.get(0, 0), Some(1.0));
        assert_eq!(grid.get(0, 1), Some(0.0));
        assert_eq!(grid.get(1, 0), Some(0.0));
        assert_eq!(grid.get(1, 1), Some(2.0));
    }

    #[test]
    fn test_columns_resorted_after_remap() {
        let mut slice = TemperatureSlice::new();
        for lon in [0.0, 90.0, 180.0, 270.0] {
            slice.push(0.0, lon, lon);
        }
        let grid = unstack(&slice).unwrap();
        let expected: Vec<f64> = [-180.0, -90.0, 0.0, 90.0]
            .iter()
            .map(|l| l + LONGITUDE_OFFSET)
            .collect();
        assert_eq!(grid.longitudes(), expected.as_slice());
        // Values follow their columns
        assert_eq!(grid.row(0).unwrap().to_vec(), vec![180.0, 270.0, 0.0, 90.0]);
        assert!(grid.row(1).is_none());
    }

    #[test]
    fn test_duplicate_coordinate_rejected() {
        let mut slice = TemperatureSlice::new();
        slice.push(5.0, 10.0, 1.0);
        slice.push(5.0, 10.0, 2.0);
        assert_eq!(
            unstack(&slice),
            Err(ClimateError::DuplicateCoordinate { lat: 5.0, lon: 10.0 })
        );
    }

    #[test]
    fn test_signed_zero_latitudes_share_a_row() {
        let mut slice = TemperatureSlice::new();
        slice.push(0.0, 0.0, 1.0);
        slice.push(-0.0, 90.0, 2.0);

        let grid = unstack(&slice).unwrap();
        assert_eq!(grid.height(), 1);
        assert_eq!(grid.latitudes(), &[0.0]);
        assert_eq!(grid.row(0).unwrap().to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_signed_zero_duplicate_rejected() {
        let mut slice = TemperatureSlice::new();
        slice.push(0.0, 10.0, 1.0);
        slice.push(-0.0, 10.0, 2.0);
        assert!(matches!(
            unstack(&slice),
            Err(ClimateError::DuplicateCoordinate { .. })
        ));
    }

    #[test]
    fn test_empty_slice() {
        let grid = unstack(&TemperatureSlice::new()).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.value_range(), None);
    }

    #[test]
    fn test_mesh_is_row_major() {
        let mut slice = TemperatureSlice::new();
        slice.push(1.0, 0.0, 0.0);
        slice.push(1.0, 90.0, 0.0);
        slice.push(2.0, 0.0, 0.0);
        let grid = unstack(&slice).unwrap();
        let mesh = grid.mesh();
        assert_eq!(mesh.len(), 4);
        assert_eq!(mesh[0], (LONGITUDE_OFFSET, 1.0));
        assert_eq!(mesh[1], (90.0 + LONGITUDE_OFFSET, 1.0));
        assert_eq!(mesh[2].1, 2.0);
    }
}
