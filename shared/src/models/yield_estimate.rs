//! Yield estimation models

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{FarmInput, SoilReading};
use crate::error::{AdvisoryError, AdvisoryResult};
use crate::types::{Crop, SoilType};

/// Coarse yield classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum YieldCategory {
    /// 3 tons or less
    Low,
    /// Above 3 up to and including 7 tons
    Medium,
    /// Above 7 tons
    High,
}

impl YieldCategory {
    pub fn from_value(value: Decimal) -> Self {
        if value > Decimal::from(7) {
            YieldCategory::High
        } else if value > Decimal::from(3) {
            YieldCategory::Medium
        } else {
            YieldCategory::Low
        }
    }

    /// Chart and gauge color
    pub fn color_hex(&self) -> &'static str {
        match self {
            YieldCategory::High => "#2E7D32",
            YieldCategory::Medium => "#FBC02D",
            YieldCategory::Low => "#C62828",
        }
    }
}

impl std::fmt::Display for YieldCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YieldCategory::Low => write!(f, "Low"),
            YieldCategory::Medium => write!(f, "Medium"),
            YieldCategory::High => write!(f, "High"),
        }
    }
}

/// A yield estimate in tons
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YieldResult {
    pub value: Decimal,
    pub category: YieldCategory,
}

impl YieldResult {
    pub fn from_value(value: Decimal) -> Self {
        Self {
            value,
            category: YieldCategory::from_value(value),
        }
    }

    /// Gauge fill in percent, 10 tons and above fills the gauge
    pub fn gauge_percent(&self) -> Decimal {
        self.value
            .checked_mul(Decimal::TEN)
            .map_or(Decimal::ONE_HUNDRED, |percent| percent.min(Decimal::ONE_HUNDRED))
    }
}

/// Nominal tons per hectare for a crop
pub fn base_yield(crop: Crop) -> Decimal {
    match crop {
        Crop::Wheat => Decimal::from(3),
        Crop::Rice => Decimal::from(4),
        Crop::Corn => Decimal::from(5),
        Crop::Soybean => Decimal::new(25, 1),
        Crop::Cotton => Decimal::from(3),
    }
}

pub fn soil_multiplier(soil_type: SoilType) -> Decimal {
    match soil_type {
        SoilType::Loamy => Decimal::new(12, 1),
        SoilType::Clay => Decimal::new(9, 1),
        SoilType::Sandy => Decimal::new(8, 1),
        SoilType::Black => Decimal::new(11, 1),
    }
}

/// Nutrient adjustment, between 1.0 and 1.7
///
/// Each nutrient contributes a fifth of its level, capped independently at
/// 0.3 (nitrogen) and 0.2 (phosphorus, potassium).
pub fn nutrient_multiplier(soil: &SoilReading) -> Decimal {
    let five = Decimal::from(5);
    let term = |level: Decimal, cap: Decimal| (level / five).min(cap);

    Decimal::ONE
        + term(soil.nitrogen, Decimal::new(3, 1))
        + term(soil.phosphorus, Decimal::new(2, 1))
        + term(soil.potassium, Decimal::new(2, 1))
}

/// Only the extremes are penalized
pub fn rainfall_multiplier(rainfall: Decimal) -> Decimal {
    if rainfall < Decimal::from(50) {
        Decimal::new(8, 1)
    } else if rainfall > Decimal::from(200) {
        Decimal::new(9, 1)
    } else {
        Decimal::ONE
    }
}

pub(crate) fn area_too_large() -> AdvisoryError {
    AdvisoryError::invalid("area", "Area is too large")
}

/// Estimate yield for a farm and soil reading
///
/// Inputs are validated first; nothing is computed for a rejected input.
pub fn estimate_yield(input: &FarmInput, soil: &SoilReading) -> AdvisoryResult<YieldResult> {
    crate::validation::validate_farm_input(input)?;
    crate::validation::validate_soil_reading(soil)?;

    let per_hectare = base_yield(input.crop)
        * soil_multiplier(input.soil_type)
        * nutrient_multiplier(soil)
        * rainfall_multiplier(input.rainfall);
    let value = per_hectare
        .checked_mul(input.area)
        .ok_or_else(area_too_large)?;

    Ok(YieldResult::from_value(
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn farm(crop: Crop, soil_type: SoilType, area: i64, rainfall: i64) -> FarmInput {
        FarmInput {
            crop,
            soil_type,
            area: Decimal::from(area),
            rainfall: Decimal::from(rainfall),
        }
    }

    #[test]
    fn test_corn_on_black_soil_in_drought() {
        let result = estimate_yield(
            &farm(Crop::Corn, SoilType::Black, 2, 30),
            &SoilReading::default(),
        )
        .unwrap();
        assert_eq!(result.value, Decimal::new(880, 2));
        assert_eq!(result.category, YieldCategory::High);
    }

    #[test]
    fn test_neutral_conditions_give_base_times_soil() {
        for crop in Crop::ALL {
            for soil_type in SoilType::ALL {
                let result =
                    estimate_yield(&farm(crop, soil_type, 1, 100), &SoilReading::default())
                        .unwrap();
                let expected = (base_yield(crop) * soil_multiplier(soil_type))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                assert_eq!(result.value, expected, "{} on {}", crop, soil_type);
            }
        }
    }

    #[test]
    fn test_rainfall_bands() {
        assert_eq!(rainfall_multiplier(Decimal::from(49)), Decimal::new(8, 1));
        assert_eq!(rainfall_multiplier(Decimal::from(50)), Decimal::ONE);
        assert_eq!(rainfall_multiplier(Decimal::from(100)), Decimal::ONE);
        assert_eq!(rainfall_multiplier(Decimal::from(200)), Decimal::ONE);
        assert_eq!(rainfall_multiplier(Decimal::from(201)), Decimal::new(9, 1));
    }

    #[test]
    fn test_nutrient_multiplier_caps() {
        let rich = SoilReading::new(
            Decimal::from(7),
            Decimal::from(1000),
            Decimal::from(1000),
            Decimal::from(1000),
        );
        assert_eq!(nutrient_multiplier(&rich), Decimal::new(17, 1));

        let modest = SoilReading::new(
            Decimal::from(7),
            Decimal::ONE,
            Decimal::new(5, 1),
            Decimal::ZERO,
        );
        // 1 + 0.2 + 0.1 + 0
        assert_eq!(nutrient_multiplier(&modest), Decimal::new(13, 1));
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(YieldCategory::from_value(Decimal::new(700, 2)), YieldCategory::Medium);
        assert_eq!(YieldCategory::from_value(Decimal::new(701, 2)), YieldCategory::High);
        assert_eq!(YieldCategory::from_value(Decimal::new(300, 2)), YieldCategory::Low);
        assert_eq!(YieldCategory::from_value(Decimal::new(301, 2)), YieldCategory::Medium);
    }

    #[test]
    fn test_rounds_to_two_places() {
        // 2.5 * 0.9 * 1.0 * 1.0 * 1.333 = 2.999250
        let input = FarmInput {
            crop: Crop::Soybean,
            soil_type: SoilType::Clay,
            area: Decimal::new(1333, 3),
            rainfall: Decimal::from(100),
        };
        let result = estimate_yield(&input, &SoilReading::default()).unwrap();
        assert_eq!(result.value, Decimal::new(300, 2));
        assert_eq!(result.category, YieldCategory::Low);
    }

    #[test]
    fn test_rejects_invalid_area_without_computing() {
        let input = farm(Crop::Wheat, SoilType::Loamy, -1, 100);
        assert!(estimate_yield(&input, &SoilReading::default()).is_err());
    }

    #[test]
    fn test_huge_area_rejected_instead_of_overflowing() {
        let input = FarmInput {
            crop: Crop::Corn,
            soil_type: SoilType::Loamy,
            area: "50000000000000000000000000000".parse().unwrap(),
            rainfall: Decimal::from(100),
        };
        let rich = SoilReading::new(
            Decimal::new(65, 1),
            Decimal::TEN,
            Decimal::TEN,
            Decimal::TEN,
        );
        let err = estimate_yield(&input, &rich).unwrap_err();
        assert_eq!(err.field(), Some("area"));
    }

    #[test]
    fn test_gauge_percent_saturates() {
        assert_eq!(
            YieldResult::from_value(Decimal::new(45, 1)).gauge_percent(),
            Decimal::from(45)
        );
        assert_eq!(
            YieldResult::from_value(Decimal::from(12)).gauge_percent(),
            Decimal::ONE_HUNDRED
        );
        assert_eq!(
            YieldResult::from_value(Decimal::MAX).gauge_percent(),
            Decimal::ONE_HUNDRED
        );
    }

    #[test]
    fn test_category_display_and_colors() {
        assert_eq!(YieldCategory::High.to_string(), "High");
        assert_eq!(YieldCategory::Low.color_hex(), "#C62828");
    }
}
