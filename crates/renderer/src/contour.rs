//! Contour levels and isolines (marching squares).
//!
//! Filled maps are colored by level band; the isolines traced here are kept
//! on the [`ContourSet`] returned to the caller.

use crate::colormap::{Color, Colormap};

/// Number of levels used when the caller fixes both color limits.
pub const FIXED_LEVEL_COUNT: usize = 21;

/// Approximate number of bins for automatic levels.
pub const AUTO_BINS: usize = 10;

/// A point in grid index space: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// A line segment between two points
#[derive(Debug, Clone)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// A connected contour line for one level.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub level: f64,
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Levels spaced at `interval`, covering `[min_value, max_value]`.
///
/// The first level is the first multiple of `interval` at or above
/// `min_value`.
pub fn generate_contour_levels(min_value: f64, max_value: f64, interval: f64) -> Vec<f64> {
    if interval <= 0.0 || max_value <= min_value || !interval.is_finite() {
        return vec![];
    }

    let first = (min_value / interval).ceil() as i64;
    let last = (max_value / interval + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * interval).collect()
}

/// `n` equally spaced levels from `vmin` to `vmax` inclusive.
pub fn linspace_levels(vmin: f64, vmax: f64, n: usize) -> Vec<f64> {
    match n {
        0 => vec![],
        1 => vec![vmin],
        _ => {
            let step = (vmax - vmin) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { vmax } else { vmin + step * i as f64 })
                .collect()
        }
    }
}

/// A "nice" step (1, 2, 2.5 or 5 times a power of ten) giving at most
/// `bins` intervals over `span`.
pub fn nice_step(span: f64, bins: usize) -> f64 {
    if span <= 0.0 || bins == 0 || !span.is_finite() {
        return 1.0;
    }
    let raw = span / bins as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|&step| step >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude)
}

/// Automatic levels on a nice step, enclosing `[min_value, max_value]`.
///
/// A constant field gets three levels one unit apart around its value.
pub fn auto_levels(min_value: f64, max_value: f64, bins: usize) -> Vec<f64> {
    if max_value <= min_value {
        return vec![min_value - 1.0, min_value, min_value + 1.0];
    }
    let step = nice_step(max_value - min_value, bins);
    let low = (min_value / step).floor() * step;
    let high = (max_value / step).ceil() * step;
    generate_contour_levels(low, high, step)
}

/// Marching squares algorithm to generate contour lines
///
/// # Arguments
/// * `data` - Grid data in row-major order
/// * `width` - Grid width
/// * `height` - Grid height
/// * `level` - Contour level to extract
///
/// # Returns
/// Line segments in grid index space
pub fn march_squares(data: &[f64], width: usize, height: usize, level: f64) -> Vec<Segment> {
    if width < 2 || height < 2 || data.len() != width * height {
        return vec![];
    }

    let mut segments = Vec::new();

    for y in 0..(height - 1) {
        for x in 0..(width - 1) {
            let tl = data[y * width + x];
            let tr = data[y * width + x + 1];
            let bl = data[(y + 1) * width + x];
            let br = data[(y + 1) * width + x + 1];

            if tl.is_nan() || tr.is_nan() || bl.is_nan() || br.is_nan() {
                continue;
            }

            let mut cell_index = 0u8;
            if tl >= level {
                cell_index |= 1;
            }
            if tr >= level {
                cell_index |= 2;
            }
            if br >= level {
                cell_index |= 4;
            }
            if bl >= level {
                cell_index |= 8;
            }

            segments.extend(cell_segments(
                cell_index,
                Point::new(x as f64, y as f64),
                [tl, tr, br, bl],
                level,
            ));
        }
    }

    segments
}

/// Segments for one cell. Corners are `[tl, tr, br, bl]`.
fn cell_segments(cell_index: u8, origin: Point, corners: [f64; 4], level: f64) -> Vec<Segment> {
    let [tl, tr, br, bl] = corners;
    let (x, y) = (origin.x, origin.y);

    let top = interpolate_edge(Point::new(x, y), Point::new(x + 1.0, y), tl, tr, level);
    let right = interpolate_edge(Point::new(x + 1.0, y), Point::new(x + 1.0, y + 1.0), tr, br, level);
    let bottom = interpolate_edge(Point::new(x, y + 1.0), Point::new(x + 1.0, y + 1.0), bl, br, level);
    let left = interpolate_edge(Point::new(x, y), Point::new(x, y + 1.0), tl, bl, level);

    let seg = |start, end| Segment { start, end };
    match cell_index {
        0 | 15 => vec![],
        1 | 14 => vec![seg(left, top)],
        2 | 13 => vec![seg(top, right)],
        3 | 12 => vec![seg(left, right)],
        4 | 11 => vec![seg(right, bottom)],
        // Saddles: two separate segments
        5 => vec![seg(left, top), seg(right, bottom)],
        10 => vec![seg(top, right), seg(left, bottom)],
        6 | 9 => vec![seg(top, bottom)],
        7 | 8 => vec![seg(left, bottom)],
        _ => vec![],
    }
}

/// Point on the edge `p1 -> p2` where the field crosses `level`.
fn interpolate_edge(p1: Point, p2: Point, val1: f64, val2: f64, level: f64) -> Point {
    if (val2 - val1).abs() < 1e-12 {
        return Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0);
    }

    let t = ((level - val1) / (val2 - val1)).clamp(0.0, 1.0);
    Point::new(p1.x + t * (p2.x - p1.x), p1.y + t * (p2.y - p1.y))
}

/// Connect unordered segments into polylines.
pub fn connect_segments(segments: Vec<Segment>, level: f64) -> Vec<Contour> {
    let mut contours = Vec::new();
    let mut used = vec![false; segments.len()];
    let epsilon = 1e-6;

    for start_idx in 0..segments.len() {
        if used[start_idx] {
            continue;
        }

        let mut points = vec![segments[start_idx].start, segments[start_idx].end];
        used[start_idx] = true;
        let mut current_end = segments[start_idx].end;

        loop {
            let next = segments.iter().enumerate().find_map(|(i, seg)| {
                if used[i] {
                    None
                } else if seg.start.distance(&current_end) < epsilon {
                    Some((i, seg.end))
                } else if seg.end.distance(&current_end) < epsilon {
                    Some((i, seg.start))
                } else {
                    None
                }
            });
            let Some((i, point)) = next else { break };
            used[i] = true;
            points.push(point);
            current_end = point;
        }

        let closed = points.len() > 2 && points[0].distance(&current_end) < epsilon;
        contours.push(Contour {
            level,
            points,
            closed,
        });
    }

    contours
}

/// Isolines for every level.
pub fn generate_all_contours(data: &[f64], width: usize, height: usize, levels: &[f64]) -> Vec<Contour> {
    levels
        .iter()
        .flat_map(|&level| connect_segments(march_squares(data, width, height, level), level))
        .collect()
}

/// Handle to a filled contour plot.
///
/// Holds what is needed to color values consistently across several axes
/// and to draw a shared colorbar.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    levels: Vec<f64>,
    vmin: f64,
    vmax: f64,
    colormap: Colormap,
    colors: Vec<Color>,
    isolines: Vec<Contour>,
}

impl ContourSet {
    /// Build from at least two ascending levels.
    ///
    /// `isolines` are in geographic coordinates: `x` is longitude and `y`
    /// latitude.
    pub fn new(levels: Vec<f64>, colormap: Colormap, isolines: Vec<Contour>) -> Option<Self> {
        if levels.len() < 2 {
            return None;
        }
        let vmin = levels[0];
        let vmax = levels[levels.len() - 1];
        let colors = colormap.discrete(levels.len() - 1);
        Some(Self {
            levels,
            vmin,
            vmax,
            colormap,
            colors,
            isolines,
        })
    }

    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Color limits `(vmin, vmax)`.
    pub fn clim(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }

    pub fn colormap(&self) -> &Colormap {
        &self.colormap
    }

    /// One color per band between consecutive levels.
    pub fn band_colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn isolines(&self) -> &[Contour] {
        &self.isolines
    }

    /// Band holding `value`, clamped to the first and last band.
    pub fn band_index(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        let bands = self.colors.len();
        // Index of the first level strictly above value
        let above = self.levels.partition_point(|&l| l <= value);
        Some(above.saturating_sub(1).min(bands - 1))
    }

    pub fn color_for(&self, value: f64) -> Option<Color> {
        self.band_index(value).map(|i| self.colors[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_contour_levels() {
        let levels = generate_contour_levels(0.0, 20.0, 5.0);
        assert_eq!(levels, vec![0.0, 5.0, 10.0, 15.0, 20.0]);

        let levels = generate_contour_levels(2.0, 18.0, 5.0);
        assert_eq!(levels, vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_interpolate_edge() {
        let p = interpolate_edge(Point::new(0.0, 0.0), Point::new(1.0, 0.0), 0.0, 10.0, 5.0);
        assert!((p.x - 0.5).abs() < 1e-12);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn test_march_squares_flat() {
        let data = vec![5.0; 9];
        assert!(march_squares(&data, 3, 3, 5.5).is_empty());
    }

    #[test]
    fn test_march_squares_peak_closes() {
        let data = vec![
            0.0, 0.0, 0.0, //
            0.0, 10.0, 0.0, //
            0.0, 0.0, 0.0,
        ];
        let contours = connect_segments(march_squares(&data, 3, 3, 5.0), 5.0);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
        assert_eq!(contours[0].level, 5.0);
    }

    #[test]
    fn test_linspace_levels_endpoints() {
        let levels = linspace_levels(-2.0, 2.0, FIXED_LEVEL_COUNT);
        assert_eq!(levels.len(), 21);
        assert_eq!(levels[0], -2.0);
        assert_eq!(levels[20], 2.0);
        assert!((levels[10]).abs() < 1e-12);
    }

    #[test]
    fn test_nice_step() {
        assert_eq!(nice_step(100.0, 10), 10.0);
        assert_eq!(nice_step(37.0, 10), 5.0);
        assert_eq!(nice_step(2.2, 10), 0.25);
        assert_eq!(nice_step(0.0, 10), 1.0);
    }

    #[test]
    fn test_auto_levels_enclose_range() {
        let levels = auto_levels(241.3, 302.7, AUTO_BINS);
        assert!(levels[0] <= 241.3);
        assert!(*levels.last().unwrap() >= 302.7);
        assert!(levels.len() - 1 <= AUTO_BINS + 1);
    }

    #[test]
    fn test_band_index_clamps() {
        let set = ContourSet::new(vec![0.0, 1.0, 2.0], Colormap::cividis(), vec![]).unwrap();
        assert_eq!(set.band_index(-5.0), Some(0));
        assert_eq!(set.band_index(0.5), Some(0));
        assert_eq!(set.band_index(1.0), Some(1));
        assert_eq!(set.band_index(2.0), Some(1));
        assert_eq!(set.band_index(9.0), Some(1));
        assert_eq!(set.band_index(f64::NAN), None);
        assert_eq!(set.clim(), (0.0, 2.0));
    }
}
