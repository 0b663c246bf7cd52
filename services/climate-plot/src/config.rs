//! Figure configuration for the `map` command.
//!
//! Loaded from an optional YAML file; command-line flags override it.
//!
//! ```yaml
//! width: 1200
//! height: 700
//! projection: robinson
//! central_longitude: 0
//! colorbar: true
//! vmin: 250
//! vmax: 300
//! coastlines: /data/ne_110m_coastline.geojson
//! style:
//!   colorbar_width: 18
//!   draw_isolines: true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use projection::ProjectionKind;
use renderer::MapStyle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    pub projection: ProjectionKind,
    pub central_longitude: f64,
    pub colorbar: bool,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    /// GeoJSON coastlines; the built-in outline when unset
    pub coastlines: Option<PathBuf>,
    pub style: MapStyle,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 560,
            projection: ProjectionKind::PlateCarree,
            central_longitude: 0.0,
            colorbar: true,
            vmin: None,
            vmax: None,
            coastlines: None,
            style: MapStyle::default(),
        }
    }
}

/// Load a figure config, or the defaults when no path is given.
pub fn load_figure_config(path: Option<&Path>) -> Result<FigureConfig> {
    let Some(path) = path else {
        return Ok(FigureConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read figure config from {:?}", path))?;
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse figure config from {:?}", path))
}
