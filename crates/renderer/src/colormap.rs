//! Colors and continuous colormaps.

use serde::{Deserialize, Serialize};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

        Some(Self::rgb(r, g, b))
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Linear color interpolation, `t` clamped to [0, 1].
pub fn interpolate_color(color1: Color, color2: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;

    Color::new(
        mix(color1.r, color2.r),
        mix(color1.g, color2.g),
        mix(color1.b, color2.b),
        mix(color1.a, color2.a),
    )
}

/// Evenly spaced cividis anchors, dark blue to yellow.
const CIVIDIS: [&str; 10] = [
    "#00204D", "#00336F", "#39486B", "#575C6D", "#707173", "#8A8779", "#A69D75", "#C4B56C",
    "#E4CF5B", "#FFEA46",
];

/// A continuous colormap built from evenly spaced anchor colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    anchors: Vec<Color>,
}

impl Colormap {
    /// Build from at least one anchor.
    pub fn new(name: impl Into<String>, anchors: Vec<Color>) -> Option<Self> {
        if anchors.is_empty() {
            return None;
        }
        Some(Self {
            name: name.into(),
            anchors,
        })
    }

    /// The perceptually uniform cividis map.
    pub fn cividis() -> Self {
        Self {
            name: "cividis".to_string(),
            anchors: CIVIDIS.iter().filter_map(|h| Color::from_hex(h)).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Color at position `t` in [0, 1]; values outside are clamped.
    pub fn sample(&self, t: f64) -> Color {
        let last = self.anchors.len() - 1;
        if last == 0 || t.is_nan() {
            return self.anchors[0];
        }
        let pos = t.clamp(0.0, 1.0) * last as f64;
        let idx = (pos.floor() as usize).min(last - 1);
        interpolate_color(self.anchors[idx], self.anchors[idx + 1], pos - idx as f64)
    }

    /// `n` colors sampled at the centers of `n` equal bins.
    pub fn discrete(&self, n: usize) -> Vec<Color> {
        (0..n)
            .map(|i| self.sample((i as f64 + 0.5) / n as f64))
            .collect()
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::cividis()
    }
}
