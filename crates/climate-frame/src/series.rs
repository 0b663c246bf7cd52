//! Core labeled data types.

use climate_common::TimeKey;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One observation of a temperature series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub time: TimeKey,
    /// Latitude in degrees north
    pub lat: f64,
    /// Longitude in degrees east, [0, 360) convention
    pub lon: f64,
    pub value: f64,
}

/// A temperature field indexed by (time, lat, lon).
///
/// Records keep their insertion order; grouping operations sort their
/// output by key the same way a sorted group-by would.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSeries {
    records: Vec<Record>,
}

impl TemperatureSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append a single observation.
    pub fn push(&mut self, time: TimeKey, lat: f64, lon: f64, value: f64) {
        self.records.push(Record {
            time,
            lat,
            lon,
            value,
        });
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct time keys, in first-seen order.
    pub fn time_keys(&self) -> Vec<TimeKey> {
        let mut keys: Vec<TimeKey> = Vec::new();
        for record in &self.records {
            if !keys.contains(&record.time) {
                keys.push(record.time);
            }
        }
        keys
    }

    /// Distinct latitudes, in first-seen order.
    pub fn latitudes(&self) -> Vec<f64> {
        distinct(self.records.iter().map(|r| r.lat))
    }

    /// Distinct longitudes, in first-seen order.
    pub fn longitudes(&self) -> Vec<f64> {
        distinct(self.records.iter().map(|r| r.lon))
    }
}

impl FromIterator<Record> for TemperatureSeries {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TemperatureSeries {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// One cell of a spatial field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliceCell {
    pub lat: f64,
    pub lon: f64,
    pub value: f64,
}

/// A spatial field indexed by (lat, lon) only.
///
/// Produced by slicing a series at one time key, or by averaging a series
/// over time. At most one value per (lat, lon) is expected; [`crate::unstack`]
/// rejects slices that break this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemperatureSlice {
    cells: Vec<SliceCell>,
}

impl TemperatureSlice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, lat: f64, lon: f64, value: f64) {
        self.cells.push(SliceCell { lat, lon, value });
    }

    pub fn cells(&self) -> &[SliceCell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &SliceCell> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Value at an exact (lat, lon), if present.
    pub fn get(&self, lat: f64, lon: f64) -> Option<f64> {
        self.cells
            .iter()
            .find(|c| c.lat == lat && c.lon == lon)
            .map(|c| c.value)
    }

    /// Distinct latitudes, in first-seen order.
    pub fn latitudes(&self) -> Vec<f64> {
        distinct(self.cells.iter().map(|c| c.lat))
    }
}

impl FromIterator<SliceCell> for TemperatureSlice {
    fn from_iter<I: IntoIterator<Item = SliceCell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// One value per time key, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnualSeries {
    keys: Vec<TimeKey>,
    values: Vec<f64>,
}

impl AnnualSeries {
    /// Build from (key, value) pairs; the result is sorted by key.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (TimeKey, f64)>) -> Self {
        let mut pairs: Vec<(TimeKey, f64)> = pairs.into_iter().collect();
        pairs.sort_by_key(|(key, _)| *key);
        let (keys, values) = pairs.into_iter().unzip();
        Self { keys, values }
    }

    /// Same keys, new values (used by smoothing).
    pub(crate) fn with_values(&self, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), self.keys.len());
        Self {
            keys: self.keys.clone(),
            values,
        }
    }

    pub fn keys(&self) -> &[TimeKey] {
        &self.keys
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Value for a given key.
    pub fn get(&self, key: TimeKey) -> Option<f64> {
        self.keys
            .binary_search(&key)
            .ok()
            .map(|idx| self.values[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (TimeKey, f64)> + '_ {
        self.keys.iter().copied().zip(self.values.iter().copied())
    }
}

/// Total-order key over a (lat, lon) pair, for grouping.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoordKey {
    pub lat: f64,
    pub lon: f64,
}

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CoordKey {}

impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        signless(self.lat)
            .total_cmp(&signless(other.lat))
            .then_with(|| signless(self.lon).total_cmp(&signless(other.lon)))
    }
}

/// `-0.0` folded onto `0.0`; other values unchanged.
fn signless(v: f64) -> f64 {
    v + 0.0
}

/// Hashable identity of a coordinate label. `0.0` and `-0.0` share one.
pub(crate) fn coord_bits(v: f64) -> u64 {
    signless(v).to_bits()
}

/// Distinct values in first-seen order, compared bitwise after folding
/// `-0.0` onto `0.0`.
pub(crate) fn distinct(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut seen = std::collections::HashSet::new();
    values
        .map(signless)
        .filter(|v| seen.insert(v.to_bits()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct_preserves_order() {
        let values = distinct([10.0, -10.0, 10.0, 5.0, -10.0].into_iter());
        assert_eq!(values, vec![10.0, -10.0, 5.0]);
    }

    #[test]
    fn test_distinct_folds_negative_zero() {
        let values = distinct([-0.0, 0.0, 1.0].into_iter());
        assert_eq!(values.len(), 2);
        assert!(values[0].is_sign_positive());
        assert_eq!(coord_bits(-0.0), coord_bits(0.0));
    }

    #[test]
    fn test_coord_key_negative_zero_is_equal() {
        let a = CoordKey { lat: -0.0, lon: 10.0 };
        let b = CoordKey { lat: 0.0, lon: 10.0 };
        assert_eq!(a, b);
    }

    #[test]
    fn test_series_accessors() {
        let mut series = TemperatureSeries::new();
        series.push(TimeKey::from_year(2), 10.0, 0.0, 1.0);
        series.push(TimeKey::from_year(1), -10.0, 180.0, 2.0);
        series.push(TimeKey::from_year(2), 10.0, 180.0, 3.0);

        assert_eq!(series.len(), 3);
        assert_eq!(series.latitudes(), vec![10.0, -10.0]);
        assert_eq!(series.longitudes(), vec![0.0, 180.0]);
        assert_eq!(
            series.time_keys(),
            vec![TimeKey::from_year(2), TimeKey::from_year(1)]
        );
    }

    #[test]
    fn test_annual_series_lookup() {
        let annual = AnnualSeries::from_pairs(vec![
            (TimeKey::from_year(2), 4.0),
            (TimeKey::from_year(1), 3.0),
        ]);
        assert_eq!(annual.keys()[0], TimeKey::from_year(1));
        assert_eq!(annual.get(TimeKey::from_year(2)), Some(4.0));
        assert_eq!(annual.get(TimeKey::from_year(3)), None);
    }

    #[test]
    fn test_coord_key_orders_lat_then_lon() {
        let mut keys = vec![
            CoordKey { lat: 10.0, lon: 0.0 },
            CoordKey { lat: -10.0, lon: 180.0 },
            CoordKey { lat: -10.0, lon: 0.0 },
        ];
        keys.sort();
        assert_eq!(keys[0].lat, -10.0);
        assert_eq!(keys[0].lon, 0.0);
        assert_eq!(keys[2].lat, 10.0);
    }
}
