//! Spatial and temporal averaging.
//!
//! Means skip `NaN` values (fill values read from files); a group whose
//! values are all `NaN` averages to `NaN`.

use std::collections::BTreeMap;

use climate_common::{ClimateError, ClimateResult, TimeKey};
use tracing::debug;

use crate::series::{AnnualSeries, CoordKey, SliceCell, TemperatureSeries, TemperatureSlice};

/// Running mean accumulator that ignores NaN.
#[derive(Debug, Default, Clone, Copy)]
struct MeanAccumulator {
    sum: f64,
    count: usize,
}

impl MeanAccumulator {
    fn add(&mut self, value: f64) {
        if !value.is_nan() {
            self.sum += value;
            self.count += 1;
        }
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            f64::NAN
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Average over all (lat, lon) for each time key.
///
/// Gives the global mean temperature per model year, ordered by time key.
pub fn global_average(series: &TemperatureSeries) -> AnnualSeries {
    let mut groups: BTreeMap<TimeKey, MeanAccumulator> = BTreeMap::new();
    for record in series {
        groups.entry(record.time).or_default().add(record.value);
    }

    debug!(
        records = series.len(),
        time_keys = groups.len(),
        "Computed global average"
    );

    AnnualSeries::from_pairs(groups.into_iter().map(|(key, acc)| (key, acc.mean())))
}

/// Average over time for each (lat, lon).
///
/// The result is the per-cell climatology used as an anomaly baseline,
/// sorted by latitude and then longitude.
pub fn temporal_average_for_anomaly(series: &TemperatureSeries) -> TemperatureSlice {
    let mut groups: BTreeMap<CoordKey, MeanAccumulator> = BTreeMap::new();
    for record in series {
        groups
            .entry(CoordKey {
                lat: record.lat,
                lon: record.lon,
            })
            .or_default()
            .add(record.value);
    }

    debug!(
        records = series.len(),
        cells = groups.len(),
        "Computed temporal average"
    );

    groups
        .into_iter()
        .map(|(key, acc)| SliceCell {
            lat: key.lat,
            lon: key.lon,
            value: acc.mean(),
        })
        .collect()
}

/// Subtract a per-cell baseline from a slice.
///
/// Every cell of `slice` must have a baseline value at the same (lat, lon).
pub fn anomaly(slice: &TemperatureSlice, baseline: &TemperatureSlice) -> ClimateResult<TemperatureSlice> {
    let lookup: BTreeMap<CoordKey, f64> = baseline
        .iter()
        .map(|c| (CoordKey { lat: c.lat, lon: c.lon }, c.value))
        .collect();

    slice
        .iter()
        .map(|cell| {
            let base = lookup
                .get(&CoordKey {
                    lat: cell.lat,
                    lon: cell.lon,
                })
                .ok_or(ClimateError::MissingBaseline {
                    lat: cell.lat,
                    lon: cell.lon,
                })?;
            Ok(SliceCell {
                lat: cell.lat,
                lon: cell.lon,
                value: cell.value - base,
            })
        })
        .collect()
}
