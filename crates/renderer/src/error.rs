//! Error types for map rendering.

use climate_common::ClimateError;
use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Slice extraction or reshaping failed
    #[error(transparent)]
    Climate(#[from] ClimateError),

    #[error("Nothing to plot: the slice needs at least a 2x2 grid with finite values")]
    EmptySlice,

    #[error("Invalid color range: vmin {vmin} must be below vmax {vmax}")]
    InvalidRange { vmin: f64, vmax: f64 },

    #[error("PNG encoding failed: {0}")]
    Png(String),

    /// Pixmap allocation failed (zero or oversized dimensions)
    #[error("Cannot create canvas: {0}")]
    Canvas(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid coastline data: {0}")]
    Coastlines(String),
}
