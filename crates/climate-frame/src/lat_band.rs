//! Latitude band selection.

use tracing::debug;

use crate::series::{TemperatureSeries, TemperatureSlice};

/// Keep the records whose latitude lies in `lower..=upper`.
///
/// Only latitudes present in the input are considered; nothing is
/// interpolated. Record order is preserved.
pub fn get_lat_slice(series: &TemperatureSeries, lower: f64, upper: f64) -> TemperatureSeries {
    let allowed: Vec<f64> = series
        .latitudes()
        .into_iter()
        .filter(|lat| in_band(*lat, lower, upper))
        .collect();

    debug!(
        lower,
        upper,
        latitudes = allowed.len(),
        "Selected latitude band"
    );

    series
        .iter()
        .filter(|r| allowed.contains(&r.lat))
        .copied()
        .collect()
}

impl TemperatureSlice {
    /// Keep the cells whose latitude lies in `lower..=upper`.
    pub fn lat_band(&self, lower: f64, upper: f64) -> TemperatureSlice {
        self.iter()
            .filter(|c| in_band(c.lat, lower, upper))
            .copied()
            .collect()
    }
}

fn in_band(lat: f64, lower: f64, upper: f64) -> bool {
    lat >= lower && lat <= upper
}
