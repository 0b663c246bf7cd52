//! Tests for the longitude remap.

use climate_common::{remap_longitude, LONGITUDE_OFFSET};

// ============================================================================
// remap_longitude tests
// ============================================================================

#[test]
fn test_remap_known_points() {
    let cases = [
        (0.0, LONGITUDE_OFFSET),
        (90.0, 90.0 + LONGITUDE_OFFSET),
        (180.0, -180.0 + LONGITUDE_OFFSET),
        (270.0, -90.0 + LONGITUDE_OFFSET),
        (359.0, -1.0 + LONGITUDE_OFFSET),
    ];
    for (input, expected) in cases {
        let got = remap_longitude(input);
        assert!(
            (got - expected).abs() < 1e-9,
            "remap({}) = {}, expected {}",
            input,
            got,
            expected
        );
    }
}

#[test]
fn test_remap_stays_in_shifted_range() {
    let lower = -180.0 + LONGITUDE_OFFSET;
    let upper = 180.0 + LONGITUDE_OFFSET;
    for i in 0..720 {
        let lon = i as f64 * 0.5;
        let r = remap_longitude(lon);
        assert!(r >= lower && r < upper, "remap({}) = {} out of range", lon, r);
    }
}

#[test]
fn test_remap_is_injective_on_grid() {
    let mut remapped: Vec<f64> = (0..360).map(|i| remap_longitude(i as f64)).collect();
    remapped.sort_by(|a, b| a.total_cmp(b));
    remapped.dedup();
    assert_eq!(remapped.len(), 360);
}

#[test]
fn test_remap_handles_negative_input() {
    // Already-centered input lands in the same shifted range
    let r = remap_longitude(-90.0);
    assert!((r - (-90.0 + LONGITUDE_OFFSET)).abs() < 1e-9);
}
