//! Labeled temperature data and the transformations applied to it.
//!
//! A [`TemperatureSeries`] is the long-format table a model run produces:
//! one record per `(time, lat, lon)`. Everything in this crate takes such a
//! table (or a single-time [`TemperatureSlice`]) by reference and returns a
//! freshly built value; inputs are never modified.
//!
//! - [`averaging`]: global (per time) and temporal (per cell) means, anomalies
//! - [`rolling`]: centered or trailing moving averages
//! - [`slice`]: year → time key → spatial slice
//! - [`unstack`]: slice → lat × lon grid with centered longitudes
//! - [`lat_band`]: inclusive latitude band filtering

pub mod averaging;
pub mod lat_band;
pub mod rolling;
pub mod series;
pub mod slice;
pub mod unstack;

pub use averaging::{anomaly, global_average, temporal_average_for_anomaly};
pub use lat_band::get_lat_slice;
pub use rolling::{rolling_average, DEFAULT_WINDOW};
pub use series::{AnnualSeries, Record, SliceCell, TemperatureSeries, TemperatureSlice};
pub use slice::get_time_slice;
pub use unstack::{unstack, UnstackedGrid};

pub use climate_common::{ClimateError, ClimateResult, TimeKey};
