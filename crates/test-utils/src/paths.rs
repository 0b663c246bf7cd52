//! Locating optional model-output files and scratch directories.
//!
//! Real NetCDF files are large and never committed. Tests that want them
//! look in `TEST_DATA_DIR`, then in each crate's `testdata/` directory, and
//! skip when nothing is found (see [`require_test_file!`](crate::require_test_file)).

use std::path::PathBuf;

/// Crates that may carry a `testdata/` directory.
const DATA_CRATES: [&str; 2] = ["netcdf-parser", "renderer"];

/// The workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map(PathBuf::from)
        .unwrap_or(manifest_dir)
}

/// `crates/{crate_name}/testdata/`.
pub fn crate_testdata_dir(crate_name: &str) -> PathBuf {
    workspace_root().join("crates").join(crate_name).join("testdata")
}

/// Directories searched by [`find_test_file`], in order.
pub fn testdata_dirs() -> Vec<PathBuf> {
    std::env::var_os("TEST_DATA_DIR")
        .map(PathBuf::from)
        .into_iter()
        .chain(DATA_CRATES.iter().map(|name| crate_testdata_dir(name)))
        .chain(std::iter::once(workspace_root().join("testdata")))
        .collect()
}

/// First existing `dir/name` over [`testdata_dirs`].
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    testdata_dirs()
        .into_iter()
        .map(|dir| dir.join(name))
        .find(|path| path.is_file())
}

/// A scratch directory named `{prefix}XXXXXX`, removed on drop.
pub fn temp_test_dir(prefix: &str) -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir()
        .expect("Failed to create temporary test directory")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }

    #[test]
    fn test_search_order_ends_at_workspace_testdata() {
        let dirs = testdata_dirs();
        assert!(dirs.contains(&crate_testdata_dir("netcdf-parser")));
        assert_eq!(dirs.last(), Some(&workspace_root().join("testdata")));
    }

    #[test]
    fn test_missing_file_not_found() {
        assert_eq!(find_test_file("no_such_model_output.nc"), None);
    }

    #[test]
    fn test_temp_dir_prefix() {
        let dir = temp_test_dir("climate_test_");
        assert!(dir.path().exists());
        assert!(dir.path().to_string_lossy().contains("climate_test_"));
    }
}
