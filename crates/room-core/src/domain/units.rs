//! Linear unit conversion between the supported display units and metres.
//!
//! Metres are the canonical unit: every length stored in the domain is in
//! metres, and feet/inches only ever appear at the UI boundary.  Conversion is
//! exact linear scaling; rounding happens only in [`LinearUnit::format`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Metres per foot.
const METRES_PER_FOOT: f64 = 0.3048;
/// Metres per inch.
const METRES_PER_INCH: f64 = 0.0254;

/// Errors produced by unit parsing and conversion.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// The unit token is not one of the supported units.
    #[error("invalid unit: {0:?} (expected one of m, ft, in)")]
    InvalidUnit(String),
}

/// A supported linear unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinearUnit {
    /// The canonical unit.
    #[serde(rename = "m", alias = "metre", alias = "meter")]
    Metre,
    #[serde(rename = "ft", alias = "foot", alias = "feet")]
    Foot,
    #[serde(rename = "in", alias = "inch", alias = "inches")]
    Inch,
}

impl LinearUnit {
    /// Every supported unit, in menu order.
    pub const ALL: [LinearUnit; 3] = [LinearUnit::Metre, LinearUnit::Foot, LinearUnit::Inch];

    /// Metres represented by one of this unit.
    pub fn metres_per_unit(self) -> f64 {
        match self {
            LinearUnit::Metre => 1.0,
            LinearUnit::Foot => METRES_PER_FOOT,
            LinearUnit::Inch => METRES_PER_INCH,
        }
    }

    /// Short label shown next to values (`m`, `ft`, `in`).
    pub fn label(self) -> &'static str {
        match self {
            LinearUnit::Metre => "m",
            LinearUnit::Foot => "ft",
            LinearUnit::Inch => "in",
        }
    }

    /// Converts `value` expressed in this unit to metres.
    pub fn to_canonical(self, value: f64) -> f64 {
        value * self.metres_per_unit()
    }

    /// Converts `value_m` (metres) to this unit.
    pub fn from_canonical(self, value_m: f64) -> f64 {
        value_m / self.metres_per_unit()
    }

    /// Formats a canonical value in this unit with two decimals, e.g. `"16.00 ft"`.
    pub fn format(self, value_m: f64) -> String {
        format!("{:.2} {}", self.from_canonical(value_m), self.label())
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LinearUnit {
    type Err = UnitError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "m" | "metre" | "meter" | "metres" | "meters" => Ok(LinearUnit::Metre),
            "ft" | "foot" | "feet" => Ok(LinearUnit::Foot),
            "in" | "inch" | "inches" => Ok(LinearUnit::Inch),
            _ => Err(UnitError::InvalidUnit(token.to_string())),
        }
    }
}

/// Converts `value` in the unit named by `unit` to metres.
///
/// # Errors
///
/// Returns [`UnitError::InvalidUnit`] if `unit` is not a supported token.
pub fn to_canonical(value: f64, unit: &str) -> Result<f64, UnitError> {
    Ok(unit.parse::<LinearUnit>()?.to_canonical(value))
}

/// Converts `value_m` (metres) to the unit named by `unit`.
///
/// # Errors
///
/// Returns [`UnitError::InvalidUnit`] if `unit` is not a supported token.
pub fn from_canonical(value_m: f64, unit: &str) -> Result<f64, UnitError> {
    Ok(unit.parse::<LinearUnit>()?.from_canonical(value_m))
}

/// Formats `value_m` (metres) in the unit named by `unit`.
///
/// # Errors
///
/// Returns [`UnitError::InvalidUnit`] if `unit` is not a supported token.
pub fn format(value_m: f64, unit: &str) -> Result<String, UnitError> {
    Ok(unit.parse::<LinearUnit>()?.format(value_m))
}
