//! Thin helpers over the native netcdf library.
//!
//! Opening files, reading variables as `f64` arrays, optional attributes,
//! and locating named axes.

use std::io;
use std::path::Path;
use std::sync::Once;

use ndarray::{ArrayD, Axis, IxDyn};
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist). This creates confusing log spam like:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 3:
///   #003: ../../../src/H5Adense.c line 397 in H5A__dense_open(): can't locate attribute in name index
/// ```
///
/// Only needs to be called once per process; later calls are no-ops. Call it
/// before the first file is opened.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Open a NetCDF file for reading.
///
/// A missing path is reported as an I/O error rather than a format error.
pub(crate) fn open(path: &Path) -> NetCdfResult<netcdf::File> {
    silence_hdf5_errors();

    if !path.exists() {
        return Err(NetCdfError::IoError(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} does not exist", path.display()),
        )));
    }

    netcdf::open(path).map_err(|e| NetCdfError::netcdf("Failed to open NetCDF", e))
}

/// Look up a required variable.
pub(crate) fn variable<'f>(file: &'f netcdf::File, name: &str) -> NetCdfResult<netcdf::Variable<'f>> {
    file.variable(name)
        .ok_or_else(|| NetCdfError::missing(format!("{} variable", name)))
}

/// Read every value of `var` converted to `f64`.
pub(crate) fn read_f64(var: &netcdf::Variable) -> NetCdfResult<Vec<f64>> {
    var.get_values::<f64, _>(..)
        .map_err(|e| NetCdfError::netcdf(&format!("Failed to read {}", var.name()), e))
}

/// Read a 1-D coordinate variable, if the file has one.
pub(crate) fn coordinate(file: &netcdf::File, name: &str) -> NetCdfResult<Option<Vec<f64>>> {
    match file.variable(name) {
        Some(var) => read_f64(&var).map(Some),
        None => {
            debug!(coordinate = name, "No coordinate variable");
            Ok(None)
        }
    }
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Numeric attribute as `f64`, whatever its stored width.
pub(crate) fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value.clone())
        .ok()
        .or_else(|| f32::try_from(attr_value.clone()).ok().map(f64::from))
        .or_else(|| i32::try_from(attr_value.clone()).ok().map(f64::from))
        .or_else(|| i16::try_from(attr_value).ok().map(f64::from))
}

/// Read `var` into an N-d array shaped by its dimensions, together with
/// the dimension names in axis order.
pub(crate) fn read_array(var: &netcdf::Variable) -> NetCdfResult<(Vec<String>, ArrayD<f64>)> {
    let dims = var.dimensions();
    let names: Vec<String> = dims.iter().map(|d| d.name()).collect();
    let shape: Vec<usize> = dims.iter().map(|d| d.len()).collect();
    let raw = read_f64(var)?;
    let array = shaped(&var.name(), &shape, raw)?;
    Ok((names, array))
}

/// Wrap a flat C-ordered buffer in an array of the given shape.
pub(crate) fn shaped(name: &str, shape: &[usize], raw: Vec<f64>) -> NetCdfResult<ArrayD<f64>> {
    let expected: usize = shape.iter().product();
    let found = raw.len();
    ArrayD::from_shape_vec(IxDyn(shape), raw).map_err(|_| {
        NetCdfError::InvalidFormat(format!(
            "{} holds {} values, expected {}",
            name, found, expected
        ))
    })
}

/// Position of the axis called `name`.
pub(crate) fn axis(names: &[String], name: &str) -> NetCdfResult<Axis> {
    names
        .iter()
        .position(|n| n == name)
        .map(Axis)
        .ok_or_else(|| NetCdfError::missing(format!("{} dimension", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shaped_keeps_c_order() {
        let array = shaped("TSI", &[4, 3, 2], (0..24).map(f64::from).collect()).unwrap();
        assert_eq!(array.shape(), &[4, 3, 2]);
        assert_eq!(array[[1, 2, 1]], 11.0);
        assert_eq!(array[[3, 0, 0]], 18.0);
    }

    #[test]
    fn test_shaped_rejects_wrong_length() {
        let err = shaped("TSI", &[2, 2], vec![1.0; 3]).unwrap_err();
        assert!(matches!(err, NetCdfError::InvalidFormat(_)));
    }

    #[test]
    fn test_axis_lookup() {
        let n = names(&["lat", "time", "lon"]);
        assert_eq!(axis(&n, "time").unwrap(), Axis(1));
        assert_eq!(axis(&n, "lon").unwrap(), Axis(2));
        assert!(matches!(axis(&n, "lev"), Err(NetCdfError::MissingData(_))));
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let err = open(Path::new("/nonexistent/forcing.nc")).unwrap_err();
        assert!(matches!(err, NetCdfError::IoError(_)));
    }

    #[test]
    fn test_silence_is_idempotent() {
        silence_hdf5_errors();
        silence_hdf5_errors();
    }
}
