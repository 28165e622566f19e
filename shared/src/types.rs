//! Common types used across the platform

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AdvisoryError;

/// Supported crops
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Crop {
    Wheat,
    Rice,
    Corn,
    Soybean,
    Cotton,
}

impl Crop {
    pub const ALL: [Crop; 5] = [
        Crop::Wheat,
        Crop::Rice,
        Crop::Corn,
        Crop::Soybean,
        Crop::Cotton,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Crop::Wheat => "Wheat",
            Crop::Rice => "Rice",
            Crop::Corn => "Corn",
            Crop::Soybean => "Soybean",
            Crop::Cotton => "Cotton",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Crop {
    type Err = AdvisoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Crop::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AdvisoryError::invalid("crop", format!("unknown crop '{}'", wanted)))
    }
}

/// Soil classes accepted by the yield form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SoilType {
    Loamy,
    Clay,
    Sandy,
    Black,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [
        SoilType::Loamy,
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::Black,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SoilType::Loamy => "Loamy",
            SoilType::Clay => "Clay",
            SoilType::Sandy => "Sandy",
            SoilType::Black => "Black",
        }
    }
}

impl fmt::Display for SoilType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoilType {
    type Err = AdvisoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SoilType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                AdvisoryError::invalid("soil", format!("unknown soil type '{}'", wanted))
            })
    }
}

/// Where the soil reading used for a computation came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SoilSource {
    /// Supplied by a soil test
    Measured,
    /// No reading on file; the neutral reading was substituted
    #[default]
    Default,
}
