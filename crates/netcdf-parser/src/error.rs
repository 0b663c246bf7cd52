//! Error types for NetCDF parsing operations.

use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing required variable, dimension or coordinate value
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl NetCdfError {
    pub(crate) fn missing(what: impl Into<String>) -> Self {
        Self::MissingData(what.into())
    }

    pub(crate) fn netcdf(context: &str, err: netcdf::Error) -> Self {
        Self::InvalidFormat(format!("{}: {}", context, err))
    }
}
