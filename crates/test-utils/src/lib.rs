//! Shared test helpers for the climate-maps workspace.
//!
//! - [`generators`]: synthetic (time, lat, lon) series and slices
//! - [`fixtures`]: coordinate sets, year bounds and value ranges
//! - [`paths`]: optional model-output files and scratch directories
//!
//! Used as a dev-dependency only:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Path of an optional data file, or return early from the test.
///
/// ```ignore
/// #[test]
/// fn test_real_forcing_file() {
///     let path = require_test_file!("solar_forcing.nc");
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: '{}' not found; set TEST_DATA_DIR to run this test", $name);
                return;
            }
        }
    }};
}

/// `|left - right| <= epsilon`, with both sides shown on failure.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if !(diff <= epsilon) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// [`assert_approx_eq!`] on both members of a `(lon, lat)` or `(x, y)` pair.
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($x1, $x2, $epsilon);
        $crate::assert_approx_eq!($y1, $y2, $epsilon);
    }};
}
