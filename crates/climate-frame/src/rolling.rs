//! Moving averages over ordered sequences.

use climate_common::{ClimateError, ClimateResult};

use crate::series::AnnualSeries;

/// Default smoothing window, in samples (one sample per model year).
pub const DEFAULT_WINDOW: usize = 11;

/// Moving average of `values` over `window` samples.
///
/// With `center` the window for output `i` spans
/// `i - window / 2 ..= i + (window - 1) / 2`, so even windows sit one
/// sample left of center; otherwise it trails,
/// spanning `i + 1 - window ..= i`. Outputs whose window runs past either
/// end of the input, or contains a `NaN`, are `NaN`.
pub fn rolling_average(values: &[f64], window: usize, center: bool) -> ClimateResult<Vec<f64>> {
    if window == 0 {
        return Err(ClimateError::InvalidWindow(window));
    }

    let n = values.len();
    // Offset from the output index to the window's last sample
    let lead = if center { (window - 1) / 2 } else { 0 };

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let end = i + lead;
        if end >= n || end + 1 < window {
            out.push(f64::NAN);
            continue;
        }
        let start = end + 1 - window;
        let sum: f64 = values[start..=end].iter().sum();
        out.push(sum / window as f64);
    }
    Ok(out)
}

impl AnnualSeries {
    /// Smooth the values, keeping the time keys.
    pub fn rolling(&self, window: usize, center: bool) -> ClimateResult<AnnualSeries> {
        let smoothed = rolling_average(self.values(), window, center)?;
        Ok(self.with_values(smoothed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_seq(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            if e.is_nan() {
                assert!(a.is_nan(), "expected NaN, got {}", a);
            } else {
                assert!((a - e).abs() < 1e-12, "expected {}, got {}", e, a);
            }
        }
    }

    #[test]
    fn test_centered_odd_window() {
        let out = rolling_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3, true).unwrap();
        assert_seq(&out, &[f64::NAN, 2.0, 3.0, 4.0, f64::NAN]);
    }

    #[test]
    fn test_trailing_window() {
        let out = rolling_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3, false).unwrap();
        assert_seq(&out, &[f64::NAN, f64::NAN, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_centered_even_window_leans_left() {
        // Window 4 centered covers [i-2, i+1]
        let out = rolling_average(&[1.0, 3.0, 5.0, 7.0, 9.0], 4, true).unwrap();
        assert_seq(&out, &[f64::NAN, f64::NAN, 4.0, 6.0, f64::NAN]);
    }

    #[test]
    fn test_window_one_is_identity() {
        let input = [4.0, -1.0, 2.5];
        assert_seq(&rolling_average(&input, 1, true).unwrap(), &input);
        assert_seq(&rolling_average(&input, 1, false).unwrap(), &input);
    }

    #[test]
    fn test_window_longer_than_input() {
        let out = rolling_average(&[1.0, 2.0], 11, true).unwrap();
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_zero_window_rejected() {
        assert_eq!(
            rolling_average(&[1.0], 0, true),
            Err(ClimateError::InvalidWindow(0))
        );
    }

    #[test]
    fn test_nan_propagates() {
        let out = rolling_average(&[1.0, f64::NAN, 3.0, 4.0], 2, false).unwrap();
        assert_seq(&out, &[f64::NAN, f64::NAN, f64::NAN, 3.5]);
    }
}
