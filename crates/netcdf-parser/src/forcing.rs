//! Solar forcing reader.
//!
//! Forcing files carry total solar irradiance as `TSI(time, lev, x)`. The
//! `lev` and `x` axes are degenerate for the solar series, so a single
//! column is read: `lev == 1.0`, `x == 0`.

use std::path::Path;

use tracing::info;

use crate::error::{NetCdfError, NetCdfResult};
use crate::native;

/// Name of the irradiance variable.
pub const TSI_VARIABLE: &str = "TSI";

/// Level coordinate value holding the solar series.
pub const SOLAR_LEVEL: f64 = 1.0;

/// Horizontal coordinate value holding the solar series.
pub const SOLAR_X: f64 = 0.0;

/// One row of the forcing table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForcingRecord {
    /// Raw time coordinate (a time key).
    pub time: f64,
    /// Total solar irradiance (W m-2).
    pub tsi: f64,
    /// Model year, `time / 10000` rounded half to even.
    pub time_yr: f64,
}

impl ForcingRecord {
    pub fn new(time: f64, tsi: f64) -> Self {
        Self {
            time,
            tsi,
            time_yr: time_to_year(time),
        }
    }
}

/// Solar forcing table, one record per time sample in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolarForcing {
    records: Vec<ForcingRecord>,
}

impl SolarForcing {
    pub fn records(&self) -> &[ForcingRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForcingRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column headers for tabular output.
    pub fn columns() -> [&'static str; 3] {
        ["time", "tsi", "time_yr"]
    }

    /// Irradiance for the first record of the given model year.
    pub fn tsi_for_year(&self, year: f64) -> Option<f64> {
        self.records
            .iter()
            .find(|r| r.time_yr == year)
            .map(|r| r.tsi)
    }
}

impl FromIterator<ForcingRecord> for SolarForcing {
    fn from_iter<I: IntoIterator<Item = ForcingRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Convert a time key to a model year, rounding half to even.
pub fn time_to_year(time: f64) -> f64 {
    (time / 10000.0).round_ties_even()
}

/// Load the solar forcing table from a NetCDF file.
///
/// Reads `TSI` with dimensions `time`, `lev` and `x` in any order and keeps
/// the column at `lev == 1.0`, `x == 0`. A missing `lev` or `x` coordinate
/// variable selects index 0 on that axis. A missing `time` coordinate
/// variable numbers the samples from 0.
pub fn load_solar_forcing<P: AsRef<Path>>(path: P) -> NetCdfResult<SolarForcing> {
    let path = path.as_ref();
    let file = native::open(path)?;

    let tsi_var = native::variable(&file, TSI_VARIABLE)?;
    let (names, tsi) = native::read_array(&tsi_var)?;
    if tsi.ndim() != 3 {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} has {} dimensions, expected time, lev and x",
            TSI_VARIABLE,
            tsi.ndim()
        )));
    }

    let time_axis = native::axis(&names, "time")?;
    let lev_axis = native::axis(&names, "lev")?;
    let x_axis = native::axis(&names, "x")?;

    let lev = select_index(&file, tsi.len_of(lev_axis), "lev", SOLAR_LEVEL)?;
    let x = select_index(&file, tsi.len_of(x_axis), "x", SOLAR_X)?;

    let n_time = tsi.len_of(time_axis);
    let times = match native::coordinate(&file, "time")? {
        Some(times) if times.len() == n_time => times,
        Some(times) => {
            return Err(NetCdfError::InvalidFormat(format!(
                "time coordinate has {} values, dimension has {}",
                times.len(),
                n_time
            )))
        }
        None => (0..n_time).map(|i| i as f64).collect(),
    };

    // Drop the higher axis first so the lower index stays valid.
    let (first, second) = if lev_axis.index() > x_axis.index() {
        ((lev_axis, lev), (x_axis, x))
    } else {
        ((x_axis, x), (lev_axis, lev))
    };
    let column = tsi
        .index_axis(first.0, first.1)
        .index_axis_move(second.0, second.1);

    let forcing: SolarForcing = times
        .iter()
        .zip(column.iter())
        .map(|(&time, &value)| ForcingRecord::new(time, value))
        .collect();

    info!(
        path = %path.display(),
        records = forcing.len(),
        "Loaded solar forcing"
    );

    Ok(forcing)
}

/// Index along the `name` axis whose coordinate equals `target`.
fn select_index(file: &netcdf::File, len: usize, name: &str, target: f64) -> NetCdfResult<usize> {
    if len == 0 {
        return Err(NetCdfError::missing(format!("{} dimension is empty", name)));
    }
    match native::coordinate(file, name)? {
        Some(coords) => coords
            .iter()
            .position(|&c| c == target)
            .filter(|&idx| idx < len)
            .ok_or_else(|| NetCdfError::missing(format!("{} = {}", name, target))),
        None => Ok(0),
    }
}
