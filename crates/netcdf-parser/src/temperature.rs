//! Gridded temperature reader.

use std::path::Path;

use climate_common::TimeKey;
use climate_frame::TemperatureSeries;
use tracing::{debug, info};

use crate::error::{NetCdfError, NetCdfResult};
use crate::native;

/// Attributes checked, in order, for the fill value.
const FILL_ATTRIBUTES: [&str; 2] = ["_FillValue", "missing_value"];

/// Load a `(time, lat, lon)` variable as a [`TemperatureSeries`].
///
/// The three dimensions may appear in any order, but records are emitted
/// time-major, then latitude, then longitude. The `time`, `lat` and `lon`
/// coordinate variables are required. Packed values are unpacked with
/// `scale_factor` and `add_offset`; fill values become `NaN`.
pub fn load_temperature_series<P: AsRef<Path>>(
    path: P,
    variable: &str,
) -> NetCdfResult<TemperatureSeries> {
    let path = path.as_ref();
    let file = native::open(path)?;

    let var = native::variable(&file, variable)?;
    let (names, raw) = native::read_array(&var)?;
    if raw.ndim() != 3 {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} has {} dimensions, expected time, lat and lon",
            variable,
            raw.ndim()
        )));
    }

    let axes = [
        native::axis(&names, "time")?,
        native::axis(&names, "lat")?,
        native::axis(&names, "lon")?,
    ];
    let [times, lats, lons] = ["time", "lat", "lon"].map(|name| native::coordinate(&file, name));
    let times = required(times?, "time")?;
    let lats = required(lats?, "lat")?;
    let lons = required(lons?, "lon")?;

    for (coords, &axis) in [&times, &lats, &lons].into_iter().zip(&axes) {
        if coords.len() != raw.len_of(axis) {
            return Err(NetCdfError::InvalidFormat(format!(
                "coordinate has {} values, dimension has {}",
                coords.len(),
                raw.len_of(axis)
            )));
        }
    }

    let fill = FILL_ATTRIBUTES
        .iter()
        .find_map(|name| native::get_f64_attr(&var, name));
    let scale = native::get_f64_attr(&var, "scale_factor").unwrap_or(1.0);
    let offset = native::get_f64_attr(&var, "add_offset").unwrap_or(0.0);
    debug!(variable, ?fill, scale, offset, "Unpacking temperature");

    let cube = raw.permuted_axes(axes.map(|axis| axis.index()).to_vec());
    let mut series = TemperatureSeries::with_capacity(cube.len());
    let mut filled = 0usize;

    for (idx, &stored) in cube.indexed_iter() {
        let value = if fill == Some(stored) {
            filled += 1;
            f64::NAN
        } else {
            stored * scale + offset
        };
        series.push(TimeKey::new(times[idx[0]]), lats[idx[1]], lons[idx[2]], value);
    }

    info!(
        path = %path.display(),
        variable,
        records = series.len(),
        filled,
        "Loaded temperature series"
    );

    Ok(series)
}

fn required(coords: Option<Vec<f64>>, name: &str) -> NetCdfResult<Vec<f64>> {
    coords.ok_or_else(|| NetCdfError::missing(format!("{} coordinate variable", name)))
}
