use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors in match configuration, reported before any scanning happens
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unsupported frame '{0}': frame needs to be \"cartesian\" or \"spherical\"")]
    UnsupportedFrame(String),

    #[error("Invalid {name}: {value} is not a number")]
    InvalidThreshold { name: &'static str, value: f64 },
}

/// Coordinate frame for the first two (on-sky) coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Frame {
    /// Planar x/y; on-sky distance is Euclidean
    #[default]
    Cartesian,
    /// Longitude/latitude in degrees (ra/dec, l/b); on-sky distance is the
    /// great-circle separation in degrees
    Spherical,
}

impl Frame {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cartesian => "cartesian",
            Self::Spherical => "spherical",
        }
    }
}

impl FromStr for Frame {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cartesian" => Ok(Self::Cartesian),
            "spherical" => Ok(Self::Spherical),
            _ => Err(ConfigError::UnsupportedFrame(s.to_string())),
        }
    }
}

impl TryFrom<String> for Frame {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two distance limits applied to every candidate.
///
/// Both are exclusive: a candidate whose distance equals the limit is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// On-sky limit, in frame units (planar units or degrees)
    pub xy_lim: f64,
    /// Line-of-sight limit, in the units of the third coordinate
    pub z_lim: f64,
}

impl Thresholds {
    pub fn new(xy_lim: f64, z_lim: f64) -> Self {
        Self { xy_lim, z_lim }
    }

    /// True when both distances fall strictly under their limits
    #[inline]
    #[must_use]
    pub fn accepts(&self, on_sky: f64, line_of_sight: f64) -> bool {
        on_sky < self.xy_lim && line_of_sight < self.z_lim
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` if either limit is NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.xy_lim.is_nan() {
            return Err(ConfigError::InvalidThreshold {
                name: "xy_lim",
                value: self.xy_lim,
            });
        }
        if self.z_lim.is_nan() {
            return Err(ConfigError::InvalidThreshold {
                name: "z_lim",
                value: self.z_lim,
            });
        }
        Ok(())
    }
}
