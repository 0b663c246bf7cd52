//! Test data generators for creating synthetic temperature series.
//!
//! These generators create predictable, verifiable series that can be
//! used across the test suite.

use climate_common::TimeKey;
use climate_frame::{TemperatureSeries, TemperatureSlice};

/// Creates a series with the same value at every (year, lat, lon).
///
/// Records are emitted year by year, then latitude, then longitude,
/// the order a (time, lat, lon) file is read in.
///
/// # Example
///
/// ```
/// use test_utils::constant_series;
///
/// let series = constant_series(1..=3, &[-10.0, 10.0], &[0.0, 180.0], 5.0);
/// assert_eq!(series.len(), 12);
/// ```
pub fn constant_series(
    years: impl IntoIterator<Item = i64>,
    latitudes: &[f64],
    longitudes: &[f64],
    value: f64,
) -> TemperatureSeries {
    build_series(years, latitudes, longitudes, |_, _, _| value)
}

/// Creates a series whose value encodes its coordinates.
///
/// Each value is calculated as: `year * 1000 + lat + lon / 1000`
///
/// This makes it easy to verify which record ended up where after a
/// transformation.
pub fn coded_series(
    years: impl IntoIterator<Item = i64>,
    latitudes: &[f64],
    longitudes: &[f64],
) -> TemperatureSeries {
    build_series(years, latitudes, longitudes, |year, lat, lon| {
        year as f64 * 1000.0 + lat + lon / 1000.0
    })
}

/// Creates a temperature-like series in Kelvin.
///
/// Warm at the equator, cold at the poles, with a linear warming trend of
/// `trend_per_year` K per model year.
pub fn warming_series(
    years: impl IntoIterator<Item = i64>,
    latitudes: &[f64],
    longitudes: &[f64],
    trend_per_year: f64,
) -> TemperatureSeries {
    build_series(years, latitudes, longitudes, |year, lat, _| {
        let equator_to_pole = 30.0 * lat.to_radians().cos();
        258.0 + equator_to_pole + trend_per_year * year as f64
    })
}

/// Builds a single-time slice from a function of (lat, lon).
pub fn slice_from_fn<F>(latitudes: &[f64], longitudes: &[f64], f: F) -> TemperatureSlice
where
    F: Fn(f64, f64) -> f64,
{
    let mut slice = TemperatureSlice::new();
    for &lat in latitudes {
        for &lon in longitudes {
            slice.push(lat, lon, f(lat, lon));
        }
    }
    slice
}

/// Evenly spaced coordinates `start, start + step, ...` (`count` values).
pub fn linspace_coords(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + step * i as f64).collect()
}

fn build_series<F>(
    years: impl IntoIterator<Item = i64>,
    latitudes: &[f64],
    longitudes: &[f64],
    f: F,
) -> TemperatureSeries
where
    F: Fn(i64, f64, f64) -> f64,
{
    let mut series = TemperatureSeries::new();
    for year in years {
        let key = TimeKey::from_year(year);
        for &lat in latitudes {
            for &lon in longitudes {
                series.push(key, lat, lon, f(year, lat, lon));
            }
        }
    }
    series
}
