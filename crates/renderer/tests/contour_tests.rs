//! Tests for level selection, isolines and contour sets.

use renderer::colormap::Colormap;
use renderer::contour::{
    auto_levels, connect_segments, generate_all_contours, generate_contour_levels, linspace_levels,
    march_squares, nice_step, ContourSet,
};

// ============================================================================
// Level selection
// ============================================================================

#[test]
fn test_generate_contour_levels_negative_range() {
    let levels = generate_contour_levels(-20.0, 20.0, 10.0);
    assert_eq!(levels, vec![-20.0, -10.0, 0.0, 10.0, 20.0]);
}

#[test]
fn test_linspace_levels_twenty_one() {
    let levels = linspace_levels(-2.0, 2.0, 21);
    assert_eq!(levels.len(), 21);
    assert_eq!(levels[0], -2.0);
    assert_eq!(levels[20], 2.0);
    assert!((levels[10]).abs() < 1e-12);
    assert!((levels[1] - levels[0] - 0.2).abs() < 1e-12);
}

#[test]
fn test_nice_step_values() {
    assert_eq!(nice_step(10.0, 10), 1.0);
    assert_eq!(nice_step(12.0, 10), 2.0);
    assert_eq!(nice_step(0.5, 10), 0.05);
    assert_eq!(nice_step(0.0, 10), 1.0);
}

#[test]
fn test_auto_levels_enclose_data() {
    let levels = auto_levels(271.3, 302.8, 10);
    assert!(levels[0] <= 271.3);
    assert!(*levels.last().unwrap() >= 302.8);
    assert!(levels.len() <= 12);
    assert!(levels.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_auto_levels_constant_field() {
    assert_eq!(auto_levels(5.0, 5.0, 10), vec![4.0, 5.0, 6.0]);
}

// ============================================================================
// Marching squares
// ============================================================================

#[test]
fn test_ramp_gives_one_straight_isoline() {
    // 4x3 field increasing left to right
    let data = [0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0, 0.0, 1.0, 2.0, 3.0];
    let segments = march_squares(&data, 4, 3, 1.5);
    assert_eq!(segments.len(), 2);

    let contours = connect_segments(segments, 1.5);
    assert_eq!(contours.len(), 1);
    assert!(contours[0].points.iter().all(|p| (p.x - 1.5).abs() < 1e-9));
}

#[test]
fn test_peak_gives_closed_isoline() {
    #[rustfmt::skip]
    let data = [
        0.0, 0.0, 0.0,
        0.0, 4.0, 0.0,
        0.0, 0.0, 0.0,
    ];
    let contours = generate_all_contours(&data, 3, 3, &[2.0]);
    assert_eq!(contours.len(), 1);
    assert!(contours[0].closed);
}

#[test]
fn test_nan_cells_are_skipped() {
    let data = [f64::NAN, 1.0, 0.0, 1.0];
    assert!(march_squares(&data, 2, 2, 0.5).is_empty());
}

// ============================================================================
// ContourSet
// ============================================================================

#[test]
fn test_contour_set_bands_and_clamping() {
    let set = ContourSet::new(vec![0.0, 1.0, 2.0, 3.0], Colormap::cividis(), vec![]).unwrap();
    assert_eq!(set.band_colors().len(), 3);
    assert_eq!(set.clim(), (0.0, 3.0));
    assert_eq!(set.band_index(0.5), Some(0));
    assert_eq!(set.band_index(2.5), Some(2));
    // Out of range values take the end bands
    assert_eq!(set.band_index(-10.0), Some(0));
    assert_eq!(set.band_index(10.0), Some(2));
    assert_eq!(set.band_index(f64::NAN), None);
}

#[test]
fn test_contour_set_needs_two_levels() {
    assert!(ContourSet::new(vec![1.0], Colormap::cividis(), vec![]).is_none());
}

#[test]
fn test_band_colors_ascend_cividis() {
    let set = ContourSet::new(linspace_levels(0.0, 1.0, 21), Colormap::cividis(), vec![]).unwrap();
    let colors = set.band_colors();
    // Dark blue to yellow
    assert!(colors[0].b > colors[0].r);
    assert!(colors[19].r > colors[19].b);
    assert!(colors.iter().all(|c| c.a == 255));
}
