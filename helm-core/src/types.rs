//! Measurement systems, marine regions and rounding modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Measurement system a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    Metric,
    Imperial,
    Nautical,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementSystem::Metric => write!(f, "metric"),
            MeasurementSystem::Imperial => write!(f, "imperial"),
            MeasurementSystem::Nautical => write!(f, "nautical"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "metric" => Ok(MeasurementSystem::Metric),
            "imperial" => Ok(MeasurementSystem::Imperial),
            "nautical" => Ok(MeasurementSystem::Nautical),
            other => Err(format!("unknown measurement system: {}", other)),
        }
    }
}

/// Marine region selecting among a unit's regional default formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarineRegion {
    Eu,
    Us,
    Uk,
    International,
}

impl Default for MarineRegion {
    fn default() -> Self {
        MarineRegion::International
    }
}

impl fmt::Display for MarineRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarineRegion::Eu => write!(f, "eu"),
            MarineRegion::Us => write!(f, "us"),
            MarineRegion::Uk => write!(f, "uk"),
            MarineRegion::International => write!(f, "international"),
        }
    }
}

impl FromStr for MarineRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eu" => Ok(MarineRegion::Eu),
            "us" => Ok(MarineRegion::Us),
            "uk" => Ok(MarineRegion::Uk),
            "international" => Ok(MarineRegion::International),
            other => Err(format!("unknown marine region: {}", other)),
        }
    }
}

/// How integer-style formats round converted values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Round half away from zero (default)
    Nearest,
    Floor,
    Ceiling,
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::Nearest
    }
}

impl RoundingMode {
    /// Apply this mode to a value, returning a whole number
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            RoundingMode::Nearest => value.round(),
            RoundingMode::Floor => value.floor(),
            RoundingMode::Ceiling => value.ceil(),
        }
    }
}
