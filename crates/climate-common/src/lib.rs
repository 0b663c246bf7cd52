//! Common types and utilities shared across the climate-maps crates.

pub mod error;
pub mod lon;
pub mod time;

pub use error::{ClimateError, ClimateResult};
pub use lon::{remap_longitude, LONGITUDE_OFFSET};
pub use time::{TimeKey, MAX_YEAR, MIN_YEAR};
