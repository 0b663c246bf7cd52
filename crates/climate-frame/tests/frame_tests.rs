//! Integration tests for series transformations.

use climate_frame::{
    anomaly, get_lat_slice, get_time_slice, global_average, rolling_average,
    temporal_average_for_anomaly, unstack, ClimateError, Record, TemperatureSeries, TimeKey,
    DEFAULT_WINDOW,
};
use test_utils::{
    assert_approx_eq, coded_series, constant_series, coords, linspace_coords, slice_from_fn,
    warming_series, years,
};

// ============================================================================
// End-to-end scenario
// ============================================================================

#[test]
fn test_constant_field_end_to_end() {
    let series = constant_series(1..=3, &coords::TWO_LATS, &coords::TWO_LONS, 5.0);

    let avg = global_average(&series);
    assert_eq!(avg.len(), 3);
    for (key, value) in avg.iter() {
        assert_eq!(value, 5.0, "year {} should average to 5", key.year());
    }

    let grid = unstack(&get_time_slice(&series, 2).unwrap()).unwrap();
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.width(), 2);
    assert!(grid.values().iter().all(|&v| v == 5.0));
    assert_eq!(grid.longitudes(), &[-180.0 + 15.0 / 16.0, 15.0 / 16.0]);
}

// ============================================================================
// get_time_slice tests
// ============================================================================

#[test]
fn test_time_slice_out_of_range_years() {
    let series = constant_series(1..=2, &coords::TWO_LATS, &coords::TWO_LONS, 1.0);
    for year in years::OUT_OF_RANGE {
        let err = get_time_slice(&series, year).unwrap_err();
        assert!(err.is_validation(), "year {} should fail validation", year);
    }
}

#[test]
fn test_time_slice_first_and_last_year() {
    let series = constant_series(
        [years::FIRST, years::LAST],
        &coords::TWO_LATS,
        &coords::TWO_LONS,
        1.0,
    );
    assert_eq!(get_time_slice(&series, years::FIRST).unwrap().len(), 4);
    assert_eq!(get_time_slice(&series, years::LAST).unwrap().len(), 4);
}

#[test]
fn test_time_slice_selects_only_that_year() {
    let series = coded_series(1..=3, &coords::TWO_LATS, &coords::TWO_LONS);
    let slice = get_time_slice(&series, 3).unwrap();
    // coded values are year * 1000 plus a coordinate offset under 100
    assert!(slice.iter().all(|c| (c.value - 3000.0).abs() < 100.0));
}

#[test]
fn test_time_slice_absent_year() {
    let series = constant_series(1..=3, &coords::TWO_LATS, &coords::TWO_LONS, 1.0);
    assert_eq!(
        get_time_slice(&series, 4).unwrap_err(),
        ClimateError::TimeKeyNotFound(TimeKey::from_year(4))
    );
}

// ============================================================================
// unstack tests
// ============================================================================

#[test]
fn test_unstack_columns_always_sorted() {
    let lons = linspace_coords(0.0, 7.5, 48);
    let slice = slice_from_fn(&coords::COARSE_LATS, &lons, |lat, lon| lat + lon);
    let grid = unstack(&slice).unwrap();
    assert_eq!(grid.width(), 48);
    assert!(grid.longitudes().windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_unstack_rows_keep_first_seen_order() {
    let slice = slice_from_fn(&[30.0, -30.0, 0.0], &coords::TWO_LONS, |_, _| 1.0);
    let grid = unstack(&slice).unwrap();
    assert_eq!(grid.latitudes(), &[30.0, -30.0, 0.0]);
}

#[test]
fn test_unstack_values_follow_longitudes() {
    let slice = slice_from_fn(&[0.0], &coords::COARSE_LONS, |_, lon| lon);
    let grid = unstack(&slice).unwrap();
    // Column values are the original longitudes; remapping back must agree
    for (label, value) in grid.longitudes().iter().zip(grid.row(0).unwrap()) {
        let original = (label - 15.0 / 16.0).rem_euclid(360.0);
        assert_approx_eq!(original, *value, 1e-9);
    }
}

// ============================================================================
// get_lat_slice tests
// ============================================================================

#[test]
fn test_lat_slice_inclusive_bounds() {
    let series = constant_series(1..=1, &coords::COARSE_LATS, &coords::TWO_LONS, 1.0);
    let band = get_lat_slice(&series, -30.0, 30.0);
    let lats = band.latitudes();
    assert_eq!(lats, vec![-30.0, 0.0, 30.0]);
    assert_eq!(band.len(), 6);
}

#[test]
fn test_lat_slice_full_band_returns_everything() {
    let series = coded_series(1..=2, &coords::COARSE_LATS, &coords::COARSE_LONS);
    assert_eq!(get_lat_slice(&series, -90.0, 90.0), series);
}

#[test]
fn test_lat_slice_empty_band() {
    let series = constant_series(1..=1, &coords::COARSE_LATS, &coords::TWO_LONS, 1.0);
    assert!(get_lat_slice(&series, 61.0, 89.0).is_empty());
}

#[test]
fn test_slice_lat_band_matches_series_filter() {
    let series = coded_series(1..=1, &coords::COARSE_LATS, &coords::TWO_LONS);
    let from_slice = get_time_slice(&series, 1).unwrap().lat_band(0.0, 60.0);
    let from_series = get_time_slice(&get_lat_slice(&series, 0.0, 60.0), 1).unwrap();
    assert_eq!(from_slice, from_series);
}

// ============================================================================
// Averaging tests
// ============================================================================

#[test]
fn test_global_average_is_idempotent() {
    let series = warming_series(1..=5, &coords::COARSE_LATS, &coords::COARSE_LONS, 0.02);
    let once = global_average(&series);

    // Re-grouping the already averaged values by time key changes nothing
    let regrouped: TemperatureSeries = once
        .iter()
        .map(|(time, value)| Record {
            time,
            lat: 0.0,
            lon: 0.0,
            value,
        })
        .collect();
    let twice = global_average(&regrouped);

    assert_eq!(once.keys(), twice.keys());
    for (a, b) in once.values().iter().zip(twice.values()) {
        assert_approx_eq!(*a, *b, 1e-12);
    }
}

#[test]
fn test_global_average_shows_trend() {
    let series = warming_series(1..=3, &coords::COARSE_LATS, &coords::COARSE_LONS, 0.5);
    let avg = global_average(&series);
    let values = avg.values();
    assert_approx_eq!(values[1] - values[0], 0.5, 1e-9);
    assert_approx_eq!(values[2] - values[1], 0.5, 1e-9);
}

#[test]
fn test_anomaly_against_temporal_average() {
    let series = warming_series(1..=3, &coords::COARSE_LATS, &coords::TWO_LONS, 1.0);
    let baseline = temporal_average_for_anomaly(&series);
    assert_eq!(baseline.len(), coords::COARSE_LATS.len() * coords::TWO_LONS.len());

    // The middle year of a linear trend equals the climatology
    let middle = anomaly(&get_time_slice(&series, 2).unwrap(), &baseline).unwrap();
    assert!(middle.iter().all(|c| c.value.abs() < 1e-9));

    let last = anomaly(&get_time_slice(&series, 3).unwrap(), &baseline).unwrap();
    assert!(last.iter().all(|c| (c.value - 1.0).abs() < 1e-9));
}

// ============================================================================
// Rolling average tests
// ============================================================================

#[test]
fn test_rolling_default_window_on_annual_series() {
    let series = warming_series(1..=20, &[0.0], &[0.0], 1.0);
    let smoothed = global_average(&series).rolling(DEFAULT_WINDOW, true).unwrap();
    let values = smoothed.values();

    assert_eq!(smoothed.len(), 20);
    assert!(values[..5].iter().all(|v| v.is_nan()));
    assert!(values[15..].iter().all(|v| v.is_nan()));
    // A centered mean of a linear trend reproduces the trend
    let raw = global_average(&series);
    for i in 5..15 {
        assert_approx_eq!(values[i], raw.values()[i], 1e-9);
    }
}

#[test]
fn test_rolling_window_one_identity() {
    let input: Vec<f64> = (0..10).map(|i| (i as f64).sin()).collect();
    assert_eq!(rolling_average(&input, 1, true).unwrap(), input);
}
