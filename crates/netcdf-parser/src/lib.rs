//! NetCDF readers for climate model output.
//!
//! Two loaders are provided:
//!
//! - [`load_solar_forcing`] reads the total solar irradiance table from a
//!   forcing file.
//! - [`load_temperature_series`] reads a gridded `(time, lat, lon)` field
//!   into a [`climate_frame::TemperatureSeries`].
//!
//! # Implementation Notes
//!
//! Files are read through the native `netcdf` library (libnetcdf + HDF5).
//! HDF5's diagnostic printing is switched off on first open; see
//! [`silence_hdf5_errors`].

mod error;
mod forcing;
mod native;
mod temperature;

pub use error::{NetCdfError, NetCdfResult};
pub use forcing::{
    load_solar_forcing, time_to_year, ForcingRecord, SolarForcing, SOLAR_LEVEL, SOLAR_X,
    TSI_VARIABLE,
};
pub use native::silence_hdf5_errors;
pub use temperature::load_temperature_series;
