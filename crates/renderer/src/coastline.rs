//! Coastline outlines.
//!
//! A coarse world outline is embedded so maps are readable without any data
//! files. Finer outlines can be loaded from GeoJSON (`Polygon`,
//! `MultiPolygon`, `LineString`, `MultiLineString`, features and
//! collections of them).

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{RenderError, RenderResult};

/// A polyline of `(lon, lat)` vertices in degrees.
pub type Polyline = Vec<(f64, f64)>;

#[rustfmt::skip]
const COARSE_WORLD: &[&[(f64, f64)]] = &[
    // North America
    &[(-168., 65.), (-162., 70.), (-140., 70.), (-125., 70.), (-95., 72.), (-80., 73.),
      (-65., 60.), (-55., 52.), (-66., 45.), (-70., 42.), (-76., 35.), (-81., 31.),
      (-80., 25.), (-83., 29.), (-90., 30.), (-97., 27.), (-97., 21.), (-92., 18.),
      (-87., 21.), (-88., 15.), (-83., 10.), (-79., 9.), (-86., 12.), (-92., 14.),
      (-105., 20.), (-110., 23.), (-115., 30.), (-118., 34.), (-124., 40.), (-124., 48.),
      (-132., 55.), (-140., 60.), (-150., 60.), (-158., 57.), (-165., 60.), (-168., 65.)],
    // South America
    &[(-79., 9.), (-72., 12.), (-62., 10.), (-52., 5.), (-45., -2.), (-35., -6.),
      (-39., -15.), (-41., -22.), (-48., -26.), (-53., -34.), (-58., -38.), (-63., -42.),
      (-66., -47.), (-69., -52.), (-68., -55.), (-73., -52.), (-75., -45.), (-73., -37.),
      (-71., -28.), (-70., -18.), (-76., -14.), (-81., -6.), (-80., 0.), (-77., 7.), (-79., 9.)],
    // Eurasia
    &[(-10., 36.), (-9., 43.), (-2., 44.), (-5., 48.), (2., 51.), (8., 54.), (10., 57.),
      (5., 62.), (15., 69.), (25., 71.), (40., 67.), (55., 69.), (70., 73.), (80., 73.),
      (100., 78.), (115., 74.), (130., 71.), (150., 71.), (170., 70.), (179.9, 66.),
      (170., 60.), (160., 55.), (157., 51.), (143., 59.), (135., 54.), (140., 48.),
      (133., 43.), (128., 38.), (126., 35.), (122., 40.), (121., 31.), (117., 24.),
      (110., 20.), (106., 18.), (109., 12.), (105., 9.), (100., 13.), (101., 3.),
      (104., 1.), (98., 8.), (98., 16.), (94., 16.), (90., 22.), (80., 15.), (77., 8.),
      (73., 17.), (67., 24.), (57., 25.), (56., 27.), (52., 24.), (48., 30.), (50., 26.),
      (56., 22.), (59., 22.), (52., 16.), (44., 12.), (38., 20.), (35., 28.), (34., 31.),
      (36., 36.), (28., 37.), (23., 38.), (19., 40.), (13., 45.), (16., 41.), (15., 38.),
      (9., 44.), (3., 43.), (0., 39.), (-5., 36.), (-10., 36.)],
    // Africa
    &[(-17., 21.), (-10., 30.), (-5., 36.), (10., 37.), (11., 33.), (20., 31.), (32., 31.),
      (35., 28.), (43., 12.), (51., 12.), (50., 2.), (40., -5.), (40., -15.), (35., -25.),
      (27., -34.), (20., -35.), (17., -29.), (12., -17.), (13., -10.), (9., -1.), (9., 4.),
      (4., 6.), (-8., 4.), (-13., 8.), (-17., 15.), (-17., 21.)],
    // Australia
    &[(114., -22.), (114., -34.), (118., -35.), (124., -33.), (132., -32.), (138., -35.),
      (141., -38.), (147., -38.), (150., -37.), (153., -30.), (153., -25.), (146., -19.),
      (143., -11.), (140., -18.), (136., -12.), (131., -11.), (127., -14.), (122., -18.),
      (114., -22.)],
    // Antarctica
    &[(-179.9, -78.), (-150., -77.), (-120., -73.), (-90., -72.), (-60., -64.), (-60., -70.),
      (-30., -78.), (0., -70.), (30., -69.), (60., -67.), (90., -66.), (120., -66.),
      (150., -68.), (179.9, -78.)],
    // Greenland
    &[(-73., 78.), (-60., 82.), (-30., 83.), (-20., 80.), (-20., 72.), (-40., 65.),
      (-44., 60.), (-50., 64.), (-55., 70.), (-73., 78.)],
    // Great Britain
    &[(-5., 50.), (1., 51.), (2., 53.), (-2., 57.), (-3., 59.), (-6., 58.), (-5., 55.),
      (-3., 54.), (-5., 52.), (-5., 50.)],
    // Japan
    &[(130., 31.), (135., 34.), (140., 35.), (142., 40.), (141., 45.), (139., 42.),
      (136., 37.), (132., 35.), (130., 31.)],
];

/// A set of coastline polylines.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Coastlines {
    lines: Vec<Polyline>,
}

impl Coastlines {
    pub fn new(lines: Vec<Polyline>) -> Self {
        Self { lines }
    }

    /// The embedded low-resolution world outline.
    pub fn coarse() -> Self {
        Self {
            lines: COARSE_WORLD.iter().map(|line| line.to_vec()).collect(),
        }
    }

    /// Parse outlines from a GeoJSON document.
    pub fn from_geojson(json: &str) -> RenderResult<Self> {
        let doc: Value = serde_json::from_str(json)
            .map_err(|e| RenderError::Coastlines(format!("invalid JSON: {}", e)))?;
        let mut lines = Vec::new();
        collect_geometry(&doc, &mut lines)?;
        debug!(polylines = lines.len(), "Parsed GeoJSON coastlines");
        Ok(Self { lines })
    }

    /// Read and parse a GeoJSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> RenderResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_geojson(&json)
    }

    pub fn lines(&self) -> &[Polyline] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn collect_geometry(value: &Value, out: &mut Vec<Polyline>) -> RenderResult<()> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| RenderError::Coastlines("object without a type".to_string()))?;

    match kind {
        "FeatureCollection" => {
            for feature in array(value, "features")? {
                collect_geometry(feature, out)?;
            }
        }
        "Feature" => match value.get("geometry") {
            Some(Value::Null) | None => {}
            Some(geometry) => collect_geometry(geometry, out)?,
        },
        "GeometryCollection" => {
            for geometry in array(value, "geometries")? {
                collect_geometry(geometry, out)?;
            }
        }
        "LineString" => out.push(positions(coordinates(value)?)?),
        "MultiLineString" | "Polygon" => {
            for ring in as_array(coordinates(value)?)? {
                out.push(positions(ring)?);
            }
        }
        "MultiPolygon" => {
            for polygon in as_array(coordinates(value)?)? {
                for ring in as_array(polygon)? {
                    out.push(positions(ring)?);
                }
            }
        }
        // Points carry no outline
        "Point" | "MultiPoint" => {}
        other => {
            return Err(RenderError::Coastlines(format!(
                "unsupported geometry type {}",
                other
            )))
        }
    }
    Ok(())
}

fn array<'a>(value: &'a Value, key: &str) -> RenderResult<&'a Vec<Value>> {
    value
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| RenderError::Coastlines(format!("missing {} array", key)))
}

fn coordinates(value: &Value) -> RenderResult<&Value> {
    value
        .get("coordinates")
        .ok_or_else(|| RenderError::Coastlines("geometry without coordinates".to_string()))
}

fn as_array(value: &Value) -> RenderResult<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| RenderError::Coastlines("expected an array".to_string()))
}

fn positions(value: &Value) -> RenderResult<Polyline> {
    as_array(value)?
        .iter()
        .map(|position| {
            let pair = as_array(position)?;
            match (
                pair.first().and_then(Value::as_f64),
                pair.get(1).and_then(Value::as_f64),
            ) {
                (Some(lon), Some(lat)) => Ok((lon, lat)),
                _ => Err(RenderError::Coastlines(format!(
                    "invalid position {}",
                    position
                ))),
            }
        })
        .collect()
}
