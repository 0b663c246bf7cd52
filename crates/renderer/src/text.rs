//! TrueType text for titles and colorbar labels.
//!
//! Glyphs are rasterized with rusttype into a coverage mask, which is then
//! filled with the text color through tiny-skia.

use std::sync::OnceLock;

use rusttype::{point, Font, Scale};
use tiny_skia::{Mask, Paint, Pixmap, Transform};

use crate::colormap::Color;

/// Embedded font data - DejaVu Sans Mono (a clean, readable monospace font)
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

fn font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = Font::try_from_bytes(FONT_DATA);
        if font.is_none() {
            tracing::warn!("Failed to load font for text rendering");
        }
        font
    })
    .as_ref()
}

/// Scale at which capital letters are `size` pixels tall.
fn cap_scale(font: &Font<'static>, size: f32) -> Scale {
    let probe = Scale::uniform(size);
    let cap = font
        .glyph('H')
        .scaled(probe)
        .exact_bounding_box()
        .map(|bb| -bb.min.y)
        .filter(|&h| h > 0.0)
        .unwrap_or(size);
    Scale::uniform(size * size / cap)
}

fn run_width(font: &Font<'static>, scale: Scale, text: &str) -> f32 {
    font.layout(text, scale, point(0.0, 0.0))
        .last()
        .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0)
}

/// Width in pixels of `text` drawn with cap height `size`.
pub fn text_width(text: &str, size: f32) -> f32 {
    match font() {
        Some(font) => run_width(font, cap_scale(font, size), text),
        None => 0.0,
    }
}

/// Draw `text` with cap height `size`, vertically centered on `y`.
pub fn draw_text(
    pixmap: &mut Pixmap,
    text: &str,
    x: f32,
    y: f32,
    size: f32,
    color: Color,
    align: Align,
) {
    let Some(font) = font() else {
        return;
    };
    let scale = cap_scale(font, size);
    let width = run_width(font, scale, text);
    let left = match align {
        Align::Left => x,
        Align::Center => x - width / 2.0,
        Align::Right => x - width,
    };
    let baseline = y + size / 2.0;

    let (w, h) = (pixmap.width() as i32, pixmap.height() as i32);
    let Some(mut mask) = Mask::new(pixmap.width(), pixmap.height()) else {
        return;
    };
    let coverage = mask.data_mut();
    let mut inked = false;

    for glyph in font.layout(text, scale, point(left, baseline)) {
        let Some(bb) = glyph.pixel_bounding_box() else {
            continue;
        };
        glyph.draw(|gx, gy, v| {
            let (px, py) = (bb.min.x + gx as i32, bb.min.y + gy as i32);
            if px >= 0 && py >= 0 && px < w && py < h {
                let idx = (py * w + px) as usize;
                coverage[idx] = coverage[idx].max((v * 255.0).round() as u8);
                inked = true;
            }
        });
    }
    if !inked {
        return;
    }

    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    if let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, w as f32, h as f32) {
        pixmap.fill_rect(rect, &paint, Transform::identity(), Some(&mask));
    }
}

/// Compact label for a level value.
pub fn format_level(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 {
        "0".to_string()
    } else if value.fract().abs() < 1e-9 && magnitude < 1e6 {
        format!("{:.0}", value)
    } else if magnitude >= 100.0 {
        format!("{:.1}", value)
    } else if magnitude >= 1.0 {
        format!("{:.2}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        format!("{:.3}", value)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
