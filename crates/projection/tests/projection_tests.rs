//! Behaviour shared by every projection.

use projection::{MapProjection, PlateCarree, ProjectionKind, Robinson};

fn all() -> Vec<Box<dyn MapProjection>> {
    vec![Box::new(PlateCarree::default()), Box::new(Robinson::default())]
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_roundtrip_across_the_globe() {
    for proj in all() {
        for lat in (-85..=85).step_by(17) {
            for lon in (-175..=175).step_by(25) {
                let (lat, lon) = (lat as f64, lon as f64);
                let (x, y) = proj.project(lon, lat);
                let (lon2, lat2) = proj
                    .unproject(x, y)
                    .unwrap_or_else(|| panic!("{} lost ({}, {})", proj.name(), lon, lat));
                assert!((lon - lon2).abs() < 1e-6, "{}: lon {} -> {}", proj.name(), lon, lon2);
                assert!((lat - lat2).abs() < 1e-6, "{}: lat {} -> {}", proj.name(), lat, lat2);
            }
        }
    }
}

// ============================================================================
// Extents
// ============================================================================

#[test]
fn test_projected_points_inside_bounds() {
    for proj in all() {
        let (min_x, min_y, max_x, max_y) = proj.bounds();
        for lat in [-90.0, -45.0, 0.0, 45.0, 90.0] {
            for lon in [0.0, 90.0, 179.9, 200.0, 359.0] {
                let (x, y) = proj.project(lon, lat);
                assert!(x >= min_x - 1e-9 && x <= max_x + 1e-9);
                assert!(y >= min_y - 1e-9 && y <= max_y + 1e-9);
            }
        }
    }
}

#[test]
fn test_north_is_up() {
    for proj in all() {
        let (_, south) = proj.project(0.0, -30.0);
        let (_, north) = proj.project(0.0, 30.0);
        assert!(north > south, "{}", proj.name());
    }
}

#[test]
fn test_kind_deserializes_from_config() {
    let kind: ProjectionKind = serde_json::from_str("\"robinson\"").unwrap();
    assert_eq!(kind, ProjectionKind::Robinson);
    assert_eq!(ProjectionKind::default(), ProjectionKind::PlateCarree);
}

#[test]
fn test_robinson_is_narrower_at_high_latitude() {
    let p = Robinson::default();
    let (x_low, _) = p.project(90.0, 10.0);
    let (x_high, _) = p.project(90.0, 70.0);
    assert!(x_high < x_low);
}
