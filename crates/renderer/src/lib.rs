//! Map rendering for gridded temperature slices.
//!
//! Pieces, bottom-up:
//! - [`colormap`]: colors and the cividis ramp
//! - [`contour`]: level selection, marching squares and [`ContourSet`]
//! - [`field`]: the unstacked grid sorted for sampling
//! - [`frame`]: pixel rectangles and projected frames
//! - [`coastline`], [`text`]: overlays
//! - [`png`]: indexed/RGBA PNG encoding
//! - [`map`]: figures, axes and [`plot_map`]

pub mod coastline;
pub mod colormap;
pub mod contour;
pub mod error;
pub mod field;
pub mod frame;
pub mod map;
pub mod png;
pub mod text;

pub use coastline::Coastlines;
pub use colormap::{Color, Colormap};
pub use contour::ContourSet;
pub use error::{RenderError, RenderResult};
pub use frame::Rect;
pub use map::{plot_map, plot_time_slice, Figure, MapAxes, MapStyle};
pub use projection::ProjectionKind;
