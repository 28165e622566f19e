//! Soil test models and soil advice derivation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a soil test
///
/// Nutrient levels use the units of the soil-test form. The default reading is
/// neutral pH with no nutrients, which every rule below treats as deficient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilReading {
    pub ph: Decimal,
    pub nitrogen: Decimal,
    pub phosphorus: Decimal,
    pub potassium: Decimal,
}

impl Default for SoilReading {
    fn default() -> Self {
        Self {
            ph: Decimal::new(70, 1),
            nitrogen: Decimal::ZERO,
            phosphorus: Decimal::ZERO,
            potassium: Decimal::ZERO,
        }
    }
}

impl SoilReading {
    pub fn new(ph: Decimal, nitrogen: Decimal, phosphorus: Decimal, potassium: Decimal) -> Self {
        Self {
            ph,
            nitrogen,
            phosphorus,
            potassium,
        }
    }

    pub fn is_nitrogen_low(&self) -> bool {
        self.nitrogen < Decimal::ONE
    }

    pub fn is_phosphorus_low(&self) -> bool {
        self.phosphorus < Decimal::new(5, 1)
    }

    pub fn is_potassium_low(&self) -> bool {
        self.potassium < Decimal::new(5, 1)
    }
}

/// A single soil advisory line
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SoilAdvice {
    /// pH below 6
    Acidic,
    /// pH above 7.5
    Alkaline,
    OptimalPh,
    LowNitrogen,
    LowPhosphorus,
    LowPotassium,
}

impl SoilAdvice {
    pub fn message(&self) -> &'static str {
        match self {
            SoilAdvice::Acidic => "Soil is acidic. Add lime.",
            SoilAdvice::Alkaline => "Soil is alkaline. Add sulfur.",
            SoilAdvice::OptimalPh => "Soil pH is optimal.",
            SoilAdvice::LowNitrogen => "Low Nitrogen: Use nitrogen fertilizer.",
            SoilAdvice::LowPhosphorus => "Low Phosphorus: Use phosphate fertilizer.",
            SoilAdvice::LowPotassium => "Low Potassium: Use potash fertilizer.",
        }
    }

    /// Whether the line flags a problem rather than confirming a good value
    pub fn is_warning(&self) -> bool {
        !matches!(self, SoilAdvice::OptimalPh)
    }
}

impl fmt::Display for SoilAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Derive soil advice from a reading
///
/// Exactly one pH line comes first, followed by nitrogen, phosphorus and
/// potassium lines for each nutrient below its threshold.
pub fn derive_soil_advice(soil: &SoilReading) -> Vec<SoilAdvice> {
    let mut advice = Vec::with_capacity(4);

    let ph_advice = if soil.ph < Decimal::from(6) {
        SoilAdvice::Acidic
    } else if soil.ph > Decimal::new(75, 1) {
        SoilAdvice::Alkaline
    } else {
        SoilAdvice::OptimalPh
    };
    advice.push(ph_advice);

    if soil.is_nitrogen_low() {
        advice.push(SoilAdvice::LowNitrogen);
    }
    if soil.is_phosphorus_low() {
        advice.push(SoilAdvice::LowPhosphorus);
    }
    if soil.is_potassium_low() {
        advice.push(SoilAdvice::LowPotassium);
    }

    advice
}
