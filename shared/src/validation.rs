//! Validation utilities for the crop advisory engine
//!
//! Field checks return a plain message; the `validate_*` functions for whole
//! models lift those into [`AdvisoryError::InvalidInput`].

use rust_decimal::Decimal;

use crate::error::{AdvisoryError, AdvisoryResult};
use crate::models::{FarmInput, SoilReading};

// ============================================================================
// Field Validations
// ============================================================================

/// Cultivated area must be strictly positive
pub fn validate_area(area: Decimal) -> Result<(), &'static str> {
    if area <= Decimal::ZERO {
        return Err("Area must be greater than 0");
    }
    Ok(())
}

pub fn validate_rainfall(rainfall: Decimal) -> Result<(), &'static str> {
    if rainfall < Decimal::ZERO {
        return Err("Rainfall cannot be negative");
    }
    Ok(())
}

/// Nutrient levels cannot be negative; pH has no enforced range
pub fn validate_nutrient(level: Decimal) -> Result<(), &'static str> {
    if level < Decimal::ZERO {
        return Err("Nutrient level cannot be negative");
    }
    Ok(())
}

/// Convert a float from a form or a JS caller, rejecting NaN and infinities
pub fn decimal_from_f64(field: &'static str, value: f64) -> AdvisoryResult<Decimal> {
    Decimal::try_from(value)
        .map_err(|_| AdvisoryError::invalid(field, format!("{} is not a usable number", value)))
}

// ============================================================================
// Model Validations
// ============================================================================

pub fn validate_farm_input(input: &FarmInput) -> AdvisoryResult<()> {
    validate_area(input.area).map_err(|m| AdvisoryError::invalid("area", m))?;
    validate_rainfall(input.rainfall).map_err(|m| AdvisoryError::invalid("rainfall", m))?;
    Ok(())
}

pub fn validate_soil_reading(soil: &SoilReading) -> AdvisoryResult<()> {
    let nutrients = [
        ("nitrogen", soil.nitrogen),
        ("phosphorus", soil.phosphorus),
        ("potassium", soil.potassium),
    ];
    for (field, level) in nutrients {
        validate_nutrient(level).map_err(|m| AdvisoryError::invalid(field, m))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_area() {
        assert!(validate_area(Decimal::new(1, 2)).is_ok());
        assert!(validate_area(Decimal::ZERO).is_err());
        assert!(validate_area(Decimal::from(-3)).is_err());
    }

    #[test]
    fn test_validate_rainfall() {
        assert!(validate_rainfall(Decimal::ZERO).is_ok());
        assert!(validate_rainfall(Decimal::new(-1, 1)).is_err());
    }

    #[test]
    fn test_soil_reading_accepts_any_ph() {
        let soil = SoilReading::new(
            Decimal::from(-4),
            Decimal::ONE,
            Decimal::ONE,
            Decimal::ONE,
        );
        assert!(validate_soil_reading(&soil).is_ok());
    }

    #[test]
    fn test_soil_reading_rejects_negative_nutrient() {
        let soil = SoilReading::new(
            Decimal::from(7),
            Decimal::ONE,
            Decimal::from(-1),
            Decimal::ONE,
        );
        let err = validate_soil_reading(&soil).unwrap_err();
        assert_eq!(err.field(), Some("phosphorus"));
    }

    #[test]
    fn test_decimal_from_f64() {
        assert_eq!(decimal_from_f64("area", 2.5).unwrap(), Decimal::new(25, 1));
        assert!(decimal_from_f64("area", f64::NAN).is_err());
        assert!(decimal_from_f64("area", f64::INFINITY).is_err());
    }
}
