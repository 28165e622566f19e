//! Category advice bundles and site guidance

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::yield_estimate::area_too_large;
use super::{FarmInput, YieldCategory};
use crate::error::AdvisoryResult;
use crate::types::SoilType;

/// Six-field guidance block attached to a yield category
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AdvisoryBundle {
    pub fertilizer: &'static str,
    pub water: &'static str,
    pub soil_tips: &'static str,
    pub weather_advice: &'static str,
    pub pest_management: &'static str,
    pub next_crop: &'static str,
}

static HIGH_BUNDLE: AdvisoryBundle = AdvisoryBundle {
    fertilizer: "Maintain current fertilization schedule",
    water: "Irrigate as usual",
    soil_tips: "Keep monitoring soil nutrients",
    weather_advice: "Optimal weather, no major action needed",
    pest_management: "Regularly check for pests, minimal action needed",
    next_crop: "Consider planting legumes next season for nitrogen fixation",
};

static MEDIUM_BUNDLE: AdvisoryBundle = AdvisoryBundle {
    fertilizer: "Increase nitrogen and potassium slightly",
    water: "Ensure regular irrigation",
    soil_tips: "Test soil pH and add amendments if needed",
    weather_advice: "Watch for dry spells, provide extra irrigation",
    pest_management: "Monitor crops closely, treat early signs of pests",
    next_crop: "Plant leafy vegetables or pulses next season",
};

static LOW_BUNDLE: AdvisoryBundle = AdvisoryBundle {
    fertilizer: "Apply balanced fertilizers and consider compost",
    water: "Increase irrigation frequency",
    soil_tips: "Check for nutrient deficiencies and pest infestation",
    weather_advice: "Protect crops from extreme weather events",
    pest_management: "High risk of pests, apply preventive measures",
    next_crop: "Plant soil-enriching crops like legumes or green manure",
};

pub fn advisory_bundle(category: YieldCategory) -> &'static AdvisoryBundle {
    match category {
        YieldCategory::High => &HIGH_BUNDLE,
        YieldCategory::Medium => &MEDIUM_BUNDLE,
        YieldCategory::Low => &LOW_BUNDLE,
    }
}

/// Management tip for a soil class
pub fn soil_type_tip(soil_type: SoilType) -> &'static str {
    match soil_type {
        SoilType::Loamy => "Rich soil; add compost every season and maintain drainage.",
        SoilType::Clay => "Heavy soil; mix compost + coarse sand to improve aeration.",
        SoilType::Sandy => "Drains fast; add mulch + organic matter to retain moisture.",
        SoilType::Black => "Fertile soil; monitor pH and avoid overwatering.",
    }
}

/// Rainfall tip, using the same bands as the yield rainfall multiplier
pub fn rainfall_tip(rainfall: Decimal) -> &'static str {
    if rainfall < Decimal::from(50) {
        "Low rainfall: use drip irrigation and mulch."
    } else if rainfall > Decimal::from(200) {
        "Heavy rainfall: increase drainage and prevent fungus."
    } else {
        "Moderate rainfall: maintain stable irrigation."
    }
}

/// Seasonal input quantities for a field
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResourcePlan {
    /// kg of NPK per season
    pub fertilizer_kg: Decimal,
    pub irrigations_per_week: Decimal,
}

impl ResourcePlan {
    pub fn fertilizer_note(&self) -> String {
        format!("{} kg NPK per season.", self.fertilizer_kg)
    }

    pub fn water_note(&self) -> String {
        format!("{} irrigations/week.", self.irrigations_per_week)
    }
}

/// Estimate fertilizer and irrigation quantities from area, soil and rainfall
///
/// Loamy and black soils take 60 kg/ha, others 50 kg/ha. Fields under 80 mm
/// of rain get three irrigations per hectare each week, others two.
pub fn plan_resources(input: &FarmInput) -> AdvisoryResult<ResourcePlan> {
    let kg_per_hectare = match input.soil_type {
        SoilType::Loamy | SoilType::Black => Decimal::from(60),
        SoilType::Clay | SoilType::Sandy => Decimal::from(50),
    };
    let irrigations_per_hectare = if input.rainfall < Decimal::from(80) {
        Decimal::from(3)
    } else {
        Decimal::from(2)
    };

    let whole = |d: Decimal| d.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);

    let scaled = |rate: Decimal| {
        input
            .area
            .checked_mul(rate)
            .map(whole)
            .ok_or_else(area_too_large)
    };

    Ok(ResourcePlan {
        fertilizer_kg: scaled(kg_per_hectare)?,
        irrigations_per_week: scaled(irrigations_per_hectare)?,
    })
}
