//! Year-based extraction of spatial slices.

use climate_common::{ClimateError, ClimateResult, TimeKey, MAX_YEAR, MIN_YEAR};
use tracing::{debug, warn};

use crate::series::{SliceCell, TemperatureSeries, TemperatureSlice};

/// Extract the (lat, lon) field for one model year.
///
/// The year must lie in `1..=999`; its time key (`year * 10000 + 716`)
/// must exist in `series`. Cells keep the order they have in the series.
pub fn get_time_slice(series: &TemperatureSeries, year: i64) -> ClimateResult<TemperatureSlice> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        warn!(year, min = MIN_YEAR, max = MAX_YEAR, "Requested year is out of range");
        return Err(ClimateError::YearOutOfRange {
            year,
            min: MIN_YEAR,
            max: MAX_YEAR,
        });
    }

    let key = TimeKey::from_year(year);
    let slice: TemperatureSlice = series
        .iter()
        .filter(|r| r.time == key)
        .map(|r| SliceCell {
            lat: r.lat,
            lon: r.lon,
            value: r.value,
        })
        .collect();

    if slice.is_empty() {
        return Err(ClimateError::TimeKeyNotFound(key));
    }

    debug!(year, time_key = %key, cells = slice.len(), "Extracted time slice");
    Ok(slice)
}
