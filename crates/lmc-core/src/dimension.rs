//! # Measurement Dimension
//!
//! The physical dimensions for which the metric system defines standard
//! units. Each dimension keys one standard-unit token table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A measurement dimension with its own standard-unit table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Mass (kg, g, mg).
    Weight,
    /// Length (m, cm, mm).
    Length,
    /// Volume (l, ml, cc).
    Volume,
    /// Area (sq m, sq cm, sq mm).
    Area,
    /// Temperature (°C, K).
    Temperature,
}

impl Dimension {
    /// Returns all dimensions in canonical order.
    pub fn all() -> &'static [Dimension] {
        &[
            Self::Weight,
            Self::Length,
            Self::Volume,
            Self::Area,
            Self::Temperature,
        ]
    }

    /// Returns the snake_case identifier, matching the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Length => "length",
            Self::Volume => "volume",
            Self::Area => "area",
            Self::Temperature => "temperature",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown dimension: {s:?}"))
    }
}
