//! Projection selection by name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{MapProjection, PlateCarree, Robinson};

#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("Unknown projection: {0}")]
    Unknown(String),
}

/// The supported projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    #[default]
    PlateCarree,
    Robinson,
}

impl ProjectionKind {
    /// Build the projection centered on `central_longitude`.
    pub fn build(self, central_longitude: f64) -> Box<dyn MapProjection> {
        match self {
            Self::PlateCarree => Box::new(PlateCarree::new(central_longitude)),
            Self::Robinson => Box::new(Robinson::new(central_longitude)),
        }
    }
}

impl FromStr for ProjectionKind {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "platecarree" | "equirectangular" => Ok(Self::PlateCarree),
            "robinson" => Ok(Self::Robinson),
            _ => Err(ProjectionError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlateCarree => write!(f, "platecarree"),
            Self::Robinson => write!(f, "robinson"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("robinson".parse::<ProjectionKind>(), Ok(ProjectionKind::Robinson));
        assert_eq!("Plate_Carree".parse::<ProjectionKind>(), Ok(ProjectionKind::PlateCarree));
        assert_eq!(
            "mollweide".parse::<ProjectionKind>(),
            Err(ProjectionError::Unknown("mollweide".to_string()))
        );
    }

    #[test]
    fn test_build_matches_kind() {
        for kind in [ProjectionKind::PlateCarree, ProjectionKind::Robinson] {
            assert_eq!(kind.build(0.0).name(), kind.to_string());
        }
    }
}
