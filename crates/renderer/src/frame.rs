//! Pixel rectangles and the projected frame of an axes.

use projection::MapProjection;
use serde::{Deserialize, Serialize};

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Shrink by the given margins; sides never cross.
    pub fn inset(&self, left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            x: self.x + left,
            y: self.y + top,
            width: (self.width - left - right).max(1.0),
            height: (self.height - top - bottom).max(1.0),
        }
    }

    /// Smallest rectangle holding both.
    pub fn union(&self, other: &Rect) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Self {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    pub fn to_skia(&self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// Planar extent `(min_x, min_y, max_x, max_y)`.
pub type Extent = (f64, f64, f64, f64);

/// Maps between pixels and geographic coordinates for one axes.
///
/// The extent is fitted into the axes rectangle with equal scale on both
/// axes and centered.
pub struct Frame {
    projection: Box<dyn MapProjection>,
    extent: Extent,
    plot: Rect,
    scale: f64,
}

impl Frame {
    pub fn new(projection: Box<dyn MapProjection>, extent: Extent, rect: Rect) -> Self {
        let (x0, y0, x1, y1) = extent;
        let span_x = (x1 - x0).max(f64::EPSILON);
        let span_y = (y1 - y0).max(f64::EPSILON);
        let scale = (rect.width as f64 / span_x).min(rect.height as f64 / span_y);

        let width = (span_x * scale) as f32;
        let height = (span_y * scale) as f32;
        let plot = Rect::new(
            rect.x + (rect.width - width) / 2.0,
            rect.y + (rect.height - height) / 2.0,
            width,
            height,
        );

        Self {
            projection,
            extent,
            plot,
            scale,
        }
    }

    /// Pixel area actually covered by the map.
    pub fn plot_rect(&self) -> Rect {
        self.plot
    }

    pub fn projection(&self) -> &dyn MapProjection {
        self.projection.as_ref()
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        let (x0, _, _, y1) = self.extent;
        (
            self.plot.x + ((x - x0) * self.scale) as f32,
            self.plot.y + ((y1 - y) * self.scale) as f32,
        )
    }

    pub fn from_pixel(&self, px: f32, py: f32) -> (f64, f64) {
        let (x0, _, _, y1) = self.extent;
        (
            x0 + (px - self.plot.x) as f64 / self.scale,
            y1 - (py - self.plot.y) as f64 / self.scale,
        )
    }

    pub fn geo_to_pixel(&self, lon: f64, lat: f64) -> (f32, f32) {
        let (x, y) = self.projection.project(lon, lat);
        self.to_pixel(x, y)
    }

    /// Geographic position under a pixel, if it is on the globe.
    pub fn pixel_to_geo(&self, px: f32, py: f32) -> Option<(f64, f64)> {
        let (x, y) = self.from_pixel(px, py);
        self.projection.unproject(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projection::{PlateCarree, Robinson};

    #[test]
    fn test_frame_fits_and_centers() {
        // 2:1 globe in a square: letterboxed vertically
        let frame = Frame::new(
            Box::new(PlateCarree::default()),
            (-180.0, -90.0, 180.0, 90.0),
            Rect::new(0.0, 0.0, 360.0, 360.0),
        );
        let plot = frame.plot_rect();
        assert_eq!(plot.width, 360.0);
        assert_eq!(plot.height, 180.0);
        assert_eq!(plot.y, 90.0);
    }

    #[test]
    fn test_pixel_roundtrip() {
        let frame = Frame::new(
            Box::new(Robinson::default()),
            Robinson::default().bounds(),
            Rect::new(10.0, 20.0, 400.0, 200.0),
        );
        let (px, py) = frame.geo_to_pixel(30.0, 45.0);
        let (lon, lat) = frame.pixel_to_geo(px, py).unwrap();
        test_utils::assert_coords_approx_eq!((lon, lat), (30.0, 45.0), 1e-3);
    }

    #[test]
    fn test_north_is_up_in_pixels() {
        let frame = Frame::new(
            Box::new(PlateCarree::default()),
            (-180.0, -90.0, 180.0, 90.0),
            Rect::new(0.0, 0.0, 360.0, 180.0),
        );
        assert_eq!(frame.geo_to_pixel(-180.0, 90.0), (0.0, 0.0));
        assert_eq!(frame.geo_to_pixel(0.0, -90.0), (180.0, 180.0));
    }

    #[test]
    fn test_rect_helpers() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0).inset(10.0, 5.0, 20.0, 5.0);
        assert_eq!(r, Rect::new(10.0, 5.0, 70.0, 40.0));
        let u = r.union(&Rect::new(90.0, 0.0, 20.0, 10.0));
        assert_eq!(u.right(), 110.0);
        assert_eq!(u.bottom(), 45.0);
    }
}
