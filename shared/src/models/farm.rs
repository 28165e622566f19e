//! Farm input models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AdvisoryResult;
use crate::types::{Crop, SoilType};

/// Inputs from the yield form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmInput {
    pub crop: Crop,
    #[serde(rename = "soil")]
    pub soil_type: SoilType,
    /// Cultivated area in hectares, must be positive
    pub area: Decimal,
    /// Seasonal rainfall in millimetres, must not be negative
    pub rainfall: Decimal,
}

impl FarmInput {
    /// Build a validated input
    pub fn new(
        crop: Crop,
        soil_type: SoilType,
        area: Decimal,
        rainfall: Decimal,
    ) -> AdvisoryResult<Self> {
        let input = Self {
            crop,
            soil_type,
            area,
            rainfall,
        };
        crate::validation::validate_farm_input(&input)?;
        Ok(input)
    }

    /// Build a validated input from raw form values
    pub fn parse(crop: &str, soil: &str, area: Decimal, rainfall: Decimal) -> AdvisoryResult<Self> {
        Self::new(crop.parse()?, soil.parse()?, area, rainfall)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_input() {
        let input = FarmInput::parse("corn", "Black", Decimal::from(2), Decimal::from(30)).unwrap();
        assert_eq!(input.crop, Crop::Corn);
        assert_eq!(input.soil_type, SoilType::Black);
    }

    #[test]
    fn test_rejects_non_positive_area() {
        let err = FarmInput::new(Crop::Rice, SoilType::Clay, Decimal::ZERO, Decimal::from(100))
            .unwrap_err();
        assert_eq!(err.field(), Some("area"));
    }

    #[test]
    fn test_rejects_negative_rainfall() {
        let err = FarmInput::new(Crop::Rice, SoilType::Clay, Decimal::ONE, Decimal::from(-1))
            .unwrap_err();
        assert_eq!(err.field(), Some("rainfall"));
    }

    #[test]
    fn test_rejects_unknown_crop_before_numbers() {
        let err = FarmInput::parse("Barley", "Clay", Decimal::ZERO, Decimal::ZERO).unwrap_err();
        assert_eq!(err.field(), Some("crop"));
    }

    #[test]
    fn test_deserializes_soil_key() {
        let input: FarmInput =
            serde_json::from_str(r#"{"crop":"Wheat","soil":"Loamy","area":1.5,"rainfall":120}"#)
                .unwrap();
        assert_eq!(input.soil_type, SoilType::Loamy);
        assert_eq!(input.area, Decimal::new(15, 1));
    }
}
