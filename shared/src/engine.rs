//! Full advisory for a single farm input
//!
//! Bundles everything the yield form displays: the estimate, category advice,
//! soil advice, the weekly schedule, pest advisories and site guidance.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::AdvisoryResult;
use crate::models::*;
use crate::types::{Crop, SoilSource, SoilType};

/// Everything derived from one prediction
#[derive(Debug, Clone, Serialize)]
pub struct Advisory {
    pub crop: Crop,
    pub soil: SoilType,
    pub area: Decimal,
    pub rainfall: Decimal,
    #[serde(rename = "yield")]
    pub yield_result: YieldResult,
    pub gauge_percent: Decimal,
    pub suggestions: AdvisoryBundle,
    pub soil_source: SoilSource,
    pub soil_advice: Vec<SoilAdvice>,
    pub schedule: Vec<ScheduleEntry>,
    pub pest_advice: Vec<&'static str>,
    pub soil_type_tip: &'static str,
    pub rainfall_tip: &'static str,
    pub resources: ResourcePlan,
}

impl Advisory {
    pub fn category(&self) -> YieldCategory {
        self.yield_result.category
    }
}

/// Run the whole engine for one input
///
/// A missing soil reading is replaced by the neutral default rather than
/// failing; the substitution is reported through `soil_source`.
pub fn advise(input: &FarmInput, soil: Option<&SoilReading>) -> AdvisoryResult<Advisory> {
    let (reading, soil_source) = match soil {
        Some(reading) => (reading.clone(), SoilSource::Measured),
        None => (SoilReading::default(), SoilSource::Default),
    };

    let yield_result = estimate_yield(input, &reading)?;

    Ok(Advisory {
        crop: input.crop,
        soil: input.soil_type,
        area: input.area,
        rainfall: input.rainfall,
        gauge_percent: yield_result.gauge_percent(),
        suggestions: advisory_bundle(yield_result.category).clone(),
        soil_source,
        soil_advice: derive_soil_advice(&reading),
        schedule: generate_schedule(Some(yield_result.value), Some(&reading)),
        pest_advice: lookup_pest_advice(input.crop, Some(input.soil_type)).lines(),
        soil_type_tip: soil_type_tip(input.soil_type),
        rainfall_tip: rainfall_tip(input.rainfall),
        resources: plan_resources(input)?,
        yield_result,
    })
}
