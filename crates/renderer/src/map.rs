//! Figures, map axes and filled contour maps.
//!
//! A [`Figure`] owns an RGBA canvas. Each [`MapAxes`] is a rectangle on it
//! with a projection, an optional title and a coastline layer.
//! [`plot_map`] fills the axes with a contoured temperature slice and
//! returns a [`ContourSet`] that can drive a colorbar shared between axes.

use std::path::Path;

use climate_frame::{get_time_slice, unstack, TemperatureSeries, TemperatureSlice};
use projection::{wrap_longitude, ProjectionKind};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tiny_skia::{FillRule, LineCap, LineJoin, Mask, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::{debug, info};

use crate::coastline::Coastlines;
use crate::colormap::{Color, Colormap};
use crate::contour::{auto_levels, generate_all_contours, linspace_levels, ContourSet};
use crate::error::{RenderError, RenderResult};
use crate::field::SortedField;
use crate::frame::{Frame, Rect};
use crate::png;
use crate::text::{draw_text, format_level, text_width, Align};

/// Drawing settings shared by every axes of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapStyle {
    pub background: Color,
    pub text_color: Color,
    pub outline_color: Color,
    pub outline_width: f32,
    pub coastline_color: Color,
    pub coastline_width: f32,
    /// Levels used when both color limits are given
    pub fixed_levels: usize,
    /// Target bin count for automatic levels
    pub auto_bins: usize,
    /// Stroke isolines over the filled bands
    pub draw_isolines: bool,
    pub isoline_color: Color,
    pub isoline_width: f32,
    pub colorbar_width: f32,
    pub colorbar_pad: f32,
    pub title_size: f32,
    pub label_size: f32,
}

impl Default for MapStyle {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            text_color: Color::BLACK,
            outline_color: Color::BLACK,
            outline_width: 1.0,
            coastline_color: Color::BLACK,
            coastline_width: 1.0,
            fixed_levels: crate::contour::FIXED_LEVEL_COUNT,
            auto_bins: crate::contour::AUTO_BINS,
            draw_isolines: false,
            isoline_color: Color::new(0, 0, 0, 96),
            isoline_width: 0.5,
            colorbar_width: 14.0,
            colorbar_pad: 12.0,
            title_size: 14.0,
            label_size: 9.0,
        }
    }
}

impl MapStyle {
    /// Space to the right of an axes taken by its colorbar and labels.
    pub fn colorbar_margin(&self) -> f32 {
        self.colorbar_pad + self.colorbar_width + 6.0 + text_width("-000.00", self.label_size)
    }

    /// Space above an axes taken by its title.
    pub fn title_margin(&self) -> f32 {
        self.title_size * 2.5
    }
}

/// One map panel of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct MapAxes {
    rect: Rect,
    projection: ProjectionKind,
    central_longitude: f64,
    title: Option<String>,
    global: bool,
    coastlines: Option<Coastlines>,
}

impl MapAxes {
    /// Plate Carrée axes over `rect` with the coarse coastline.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            projection: ProjectionKind::PlateCarree,
            central_longitude: 0.0,
            title: None,
            global: false,
            coastlines: Some(Coastlines::coarse()),
        }
    }

    pub fn with_projection(mut self, projection: ProjectionKind) -> Self {
        self.projection = projection;
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn projection(&self) -> ProjectionKind {
        self.projection
    }

    pub fn set_projection(&mut self, projection: ProjectionKind) {
        self.projection = projection;
    }

    pub fn central_longitude(&self) -> f64 {
        self.central_longitude
    }

    pub fn set_central_longitude(&mut self, lon: f64) {
        self.central_longitude = lon;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Mark the axes as showing the whole globe.
    pub fn set_global(&mut self) {
        self.global = true;
    }

    pub fn is_global(&self) -> bool {
        self.global
    }

    pub fn coastlines(&self) -> Option<&Coastlines> {
        self.coastlines.as_ref()
    }

    /// Replace the coastline layer; `None` hides it.
    pub fn set_coastlines(&mut self, coastlines: Option<Coastlines>) {
        self.coastlines = coastlines;
    }

    /// Projected frame covering the whole globe.
    fn frame(&self) -> Frame {
        let projection = self.projection.build(self.central_longitude);
        let extent = projection.bounds();
        Frame::new(projection, extent, self.rect)
    }
}

/// A canvas holding one or more map axes.
pub struct Figure {
    pixmap: Pixmap,
    style: MapStyle,
}

impl Figure {
    /// A blank canvas with the default style.
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        Self::with_style(width, height, MapStyle::default())
    }

    pub fn with_style(width: u32, height: u32, style: MapStyle) -> RenderResult<Self> {
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| RenderError::Canvas(format!("{}x{} pixels", width, height)))?;
        pixmap.fill(style.background.to_skia());
        Ok(Self { pixmap, style })
    }

    /// A figure split into a `rows × cols` grid of axes, row-major.
    ///
    /// Each axes leaves room for its title above and a colorbar to the
    /// right.
    pub fn subplots(rows: usize, cols: usize, width: u32, height: u32) -> RenderResult<(Self, Vec<MapAxes>)> {
        if rows == 0 || cols == 0 {
            return Err(RenderError::Canvas(format!("{}x{} subplot grid", rows, cols)));
        }
        let figure = Self::new(width, height)?;

        let cell_w = width as f32 / cols as f32;
        let cell_h = height as f32 / rows as f32;
        let style = &figure.style;
        let axes = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| (r, c)))
            .map(|(r, c)| {
                let cell = Rect::new(c as f32 * cell_w, r as f32 * cell_h, cell_w, cell_h);
                MapAxes::new(cell.inset(8.0, style.title_margin(), style.colorbar_margin(), 8.0))
            })
            .collect();

        Ok((figure, axes))
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn style(&self) -> &MapStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: MapStyle) {
        self.style = style;
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Draw one vertical colorbar beside the given axes.
    pub fn colorbar(&mut self, contours: &ContourSet, axes: &[&MapAxes]) {
        let Some(span) = axes.iter().map(|a| a.rect()).reduce(|a, b| a.union(&b)) else {
            return;
        };
        let bar = Rect::new(
            span.right() + self.style.colorbar_pad,
            span.y,
            self.style.colorbar_width,
            span.height,
        );
        draw_colorbar(&mut self.pixmap, &self.style, contours, bar);
    }

    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        png::encode_pixmap(&self.pixmap)
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        let bytes = self.to_png()?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!(path = %path.as_ref().display(), bytes = bytes.len(), "Saved figure");
        Ok(())
    }
}

/// Fill `axes` with a contoured map of `slice`.
///
/// With both `vmin` and `vmax`, the levels are equally spaced between them
/// and values outside take the end colors. Otherwise levels are chosen
/// automatically from the data range, with a single given bound replacing
/// that end of the range.
pub fn plot_map(
    slice: &TemperatureSlice,
    figure: &mut Figure,
    axes: &mut MapAxes,
    vmin: Option<f64>,
    vmax: Option<f64>,
    add_colorbar: bool,
) -> RenderResult<ContourSet> {
    let grid = unstack(slice)?;
    let (data_min, data_max) = grid.value_range().ok_or(RenderError::EmptySlice)?;
    if grid.width() < 2 || grid.height() < 2 {
        return Err(RenderError::EmptySlice);
    }

    let style = figure.style.clone();
    let levels = match (vmin, vmax) {
        (Some(lo), Some(hi)) if lo < hi => linspace_levels(lo, hi, style.fixed_levels.max(2)),
        (Some(lo), Some(hi)) => return Err(RenderError::InvalidRange { vmin: lo, vmax: hi }),
        _ => auto_levels(
            vmin.unwrap_or(data_min),
            vmax.unwrap_or(data_max),
            style.auto_bins,
        ),
    };

    let field = SortedField::from_grid(&grid);
    let isolines = generate_all_contours(field.values(), field.width(), field.height(), &levels)
        .into_iter()
        .map(|c| field.to_geographic(c))
        .collect();
    let contours = ContourSet::new(levels, Colormap::cividis(), isolines)
        .ok_or(RenderError::EmptySlice)?;

    debug!(
        rows = field.height(),
        cols = field.width(),
        levels = contours.levels().len(),
        isolines = contours.isolines().len(),
        data_min,
        data_max,
        "Contouring slice"
    );

    axes.set_global();
    let frame = axes.frame();
    let filled = fill_bands(&mut figure.pixmap, &frame, &field, &contours);
    debug!(pixels = filled, "Filled contour bands");

    let central = axes.central_longitude();
    let clip = clip_mask(&figure.pixmap, frame.plot_rect());
    if style.draw_isolines {
        draw_isolines(&mut figure.pixmap, &frame, central, &contours, &style, clip.as_ref());
    }
    if let Some(coast) = axes.coastlines() {
        draw_coastlines(&mut figure.pixmap, &frame, central, coast, &style, clip.as_ref());
    }
    draw_outline(&mut figure.pixmap, &frame, central, &style);
    if let Some(title) = axes.title() {
        let plot = frame.plot_rect();
        let y = (plot.y - style.title_size).max(style.title_size / 2.0 + 1.0);
        draw_text(
            &mut figure.pixmap,
            title,
            plot.x + plot.width / 2.0,
            y,
            style.title_size,
            style.text_color,
            Align::Center,
        );
    }

    if add_colorbar {
        figure.colorbar(&contours, &[&*axes]);
    }

    Ok(contours)
}

/// Plot the slice for `year`, titled `"Year {year}"`, with a colorbar.
pub fn plot_time_slice(
    series: &TemperatureSeries,
    year: i64,
    figure: &mut Figure,
    axes: &mut MapAxes,
    vmin: Option<f64>,
    vmax: Option<f64>,
) -> RenderResult<ContourSet> {
    let slice = get_time_slice(series, year)?;
    axes.set_title(format!("Year {}", year));
    plot_map(&slice, figure, axes, vmin, vmax, true)
}

/// Color every pixel of the plot area that lies on the globe and inside
/// the data hull. Returns the number of pixels filled.
fn fill_bands(pixmap: &mut Pixmap, frame: &Frame, field: &SortedField, contours: &ContourSet) -> usize {
    let width = pixmap.width() as usize;
    let height = pixmap.height() as usize;
    let plot = frame.plot_rect();

    let x_start = plot.x.floor().max(0.0) as usize;
    let x_end = (plot.right().ceil().max(0.0) as usize).min(width);
    let y_start = plot.y.floor().max(0.0) as usize;
    let y_end = (plot.bottom().ceil().max(0.0) as usize).min(height);

    pixmap
        .data_mut()
        .par_chunks_mut(width * 4)
        .enumerate()
        .filter(|(row, _)| (y_start..y_end).contains(row))
        .map(|(row, line)| {
            let py = row as f32 + 0.5;
            let mut filled = 0;
            for col in x_start..x_end {
                let color = frame
                    .pixel_to_geo(col as f32 + 0.5, py)
                    .and_then(|(lon, lat)| field.sample(lon, lat))
                    .and_then(|value| contours.color_for(value));
                if let Some(c) = color {
                    // Band colors are opaque, so premultiplied equals straight
                    line[col * 4..col * 4 + 4].copy_from_slice(&[c.r, c.g, c.b, 255]);
                    filled += 1;
                }
            }
            filled
        })
        .sum()
}

fn clip_mask(pixmap: &Pixmap, rect: Rect) -> Option<Mask> {
    let mut mask = Mask::new(pixmap.width(), pixmap.height())?;
    let path = PathBuilder::from_rect(rect.to_skia()?);
    mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
    Some(mask)
}

fn stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color.to_skia());
    paint.anti_alias = true;
    paint
}

/// Add a geographic polyline to `pb`, breaking it where it crosses the
/// projection seam.
fn trace_polyline(pb: &mut PathBuilder, frame: &Frame, central: f64, points: impl IntoIterator<Item = (f64, f64)>) {
    let mut previous: Option<f64> = None;
    for (lon, lat) in points {
        let rel = wrap_longitude(lon, central);
        let (px, py) = frame.geo_to_pixel(lon, lat);
        match previous {
            Some(prev) if (rel - prev).abs() <= 180.0 => pb.line_to(px, py),
            _ => pb.move_to(px, py),
        }
        previous = Some(rel);
    }
}

fn draw_coastlines(
    pixmap: &mut Pixmap,
    frame: &Frame,
    central: f64,
    coast: &Coastlines,
    style: &MapStyle,
    clip: Option<&Mask>,
) {
    let mut pb = PathBuilder::new();
    for line in coast.lines() {
        trace_polyline(&mut pb, frame, central, line.iter().copied());
    }
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(
            &path,
            &paint(style.coastline_color),
            &stroke(style.coastline_width),
            Transform::identity(),
            clip,
        );
    }
}

fn draw_isolines(
    pixmap: &mut Pixmap,
    frame: &Frame,
    central: f64,
    contours: &ContourSet,
    style: &MapStyle,
    clip: Option<&Mask>,
) {
    let mut pb = PathBuilder::new();
    for line in contours.isolines() {
        trace_polyline(&mut pb, frame, central, line.points.iter().map(|p| (p.x, p.y)));
    }
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(
            &path,
            &paint(style.isoline_color),
            &stroke(style.isoline_width),
            Transform::identity(),
            clip,
        );
    }
}

/// Trace the edge of the globe: both edge meridians and the poles.
fn draw_outline(pixmap: &mut Pixmap, frame: &Frame, central: f64, style: &MapStyle) {
    const STEPS: usize = 90;
    let west = central - 180.0 + 1e-9;
    let east = central + 180.0 - 1e-9;

    let lerp = |a: f64, b: f64, i: usize| a + (b - a) * i as f64 / STEPS as f64;
    let boundary = (0..=STEPS)
        .map(|i| (west, lerp(-90.0, 90.0, i)))
        .chain((0..=STEPS).map(|i| (lerp(west, east, i), 90.0)))
        .chain((0..=STEPS).map(|i| (east, lerp(90.0, -90.0, i))))
        .chain((0..=STEPS).map(|i| (lerp(east, west, i), -90.0)));

    let mut pb = PathBuilder::new();
    for (i, (lon, lat)) in boundary.enumerate() {
        let (px, py) = frame.geo_to_pixel(lon, lat);
        if i == 0 {
            pb.move_to(px, py);
        } else {
            pb.line_to(px, py);
        }
    }
    pb.close();

    if let Some(path) = pb.finish() {
        pixmap.stroke_path(
            &path,
            &paint(style.outline_color),
            &stroke(style.outline_width),
            Transform::identity(),
            None,
        );
    }
}

/// Vertical colorbar: one block per band, vmin at the bottom.
fn draw_colorbar(pixmap: &mut Pixmap, style: &MapStyle, contours: &ContourSet, bar: Rect) {
    let colors = contours.band_colors();
    let levels = contours.levels();
    let (vmin, vmax) = contours.clim();
    let band_h = bar.height / colors.len() as f32;

    for (i, color) in colors.iter().enumerate() {
        let top = bar.bottom() - (i + 1) as f32 * band_h;
        if let Some(rect) = tiny_skia::Rect::from_xywh(bar.x, top, bar.width, band_h + 0.5) {
            let mut fill = paint(*color);
            fill.anti_alias = false;
            pixmap.fill_rect(rect, &fill, Transform::identity(), None);
        }
    }

    if let Some(rect) = bar.to_skia() {
        let path = PathBuilder::from_rect(rect);
        pixmap.stroke_path(
            &path,
            &paint(style.outline_color),
            &stroke(style.outline_width),
            Transform::identity(),
            None,
        );
    }

    // At most six labelled ticks
    let step = (levels.len() - 1).div_ceil(5).max(1);
    let mut ticks = PathBuilder::new();
    for level in levels.iter().step_by(step) {
        let frac = ((level - vmin) / (vmax - vmin)) as f32;
        let y = bar.bottom() - frac * bar.height;
        ticks.move_to(bar.right(), y);
        ticks.line_to(bar.right() + 4.0, y);
        draw_text(
            pixmap,
            &format_level(*level),
            bar.right() + 6.0,
            y,
            style.label_size,
            style.text_color,
            Align::Left,
        );
    }
    if let Some(path) = ticks.finish() {
        pixmap.stroke_path(
            &path,
            &paint(style.outline_color),
            &stroke(style.outline_width),
            Transform::identity(),
            None,
        );
    }
}
