//! Pest and disease advisories

use serde::Serialize;

use crate::types::{Crop, SoilType};

/// Returned when no advisory exists for a crop/soil pair
pub const NO_PEST_DATA: &str = "No data available for this crop/soil combination";

/// Result of a pest lookup
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(tag = "status", content = "advisories", rename_all = "snake_case")]
pub enum PestAdvice {
    Found(&'static [&'static str]),
    NoData,
}

impl PestAdvice {
    /// Lines to display, the sentinel when nothing matched
    pub fn lines(&self) -> Vec<&'static str> {
        match self {
            PestAdvice::Found(lines) => lines.to_vec(),
            PestAdvice::NoData => vec![NO_PEST_DATA],
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, PestAdvice::Found(_))
    }
}

fn soil_advisories(crop: Crop, soil_type: SoilType) -> &'static [&'static str] {
    use Crop::*;
    use SoilType::*;

    match (crop, soil_type) {
        (Wheat, Loamy) => &["Aphids: Use neem oil", "Rust: Apply fungicide"],
        (Wheat, Clay) => &["Powdery mildew: Proper spacing", "Armyworm: Manual removal"],
        (Wheat, Sandy) => &["Aphids: Introduce ladybugs", "Leaf blight: Fungicide spray"],
        (Wheat, Black) => &["Stem rust: Resistant varieties", "Cutworm: Soil treatment"],

        (Rice, Loamy) => &["Brown spot: Fungicide", "Stem borer: Light traps"],
        (Rice, Clay) => &["Leaf blast: Resistant varieties", "Gall midge: Water management"],
        (Rice, Sandy) => &["Sheath blight: Fungicide", "Brown planthopper: Insecticide"],
        (Rice, Black) => &["Stem rot: Drainage improvement", "Leaf folder: Biological control"],

        (Corn, Loamy) => &["Corn borer: Pheromone traps", "Aphids: Insecticidal soap"],
        (Corn, Clay) => &["Rootworm: Crop rotation", "Fungal leaf spot: Fungicide"],
        (Corn, Sandy) => &["Armyworm: Manual removal", "Corn smut: Remove affected parts"],
        (Corn, Black) => &["Stem fly: Soil treatment", "Rust: Resistant varieties"],

        (Soybean, Loamy) => &["Soybean aphid: Ladybugs", "Frogeye leaf spot: Fungicide"],
        (Soybean, Clay) => &["Root rot: Well-drained soil", "Bean pod borer: Insecticide"],
        (Soybean, Sandy) => &["White mold: Fungicide", "Aphids: Neem spray"],
        (Soybean, Black) => &["Leaf blight: Resistant varieties", "Cutworm: Soil treatment"],

        (Cotton, Loamy) => &["Bollworm: Bt cotton", "Aphids: Neem oil"],
        (Cotton, Clay) => &["Leafhopper: Insecticide", "Wilt: Resistant varieties"],
        (Cotton, Sandy) => &["Whitefly: Yellow sticky traps", "Fusarium wilt: Crop rotation"],
        (Cotton, Black) => &["Jassid: Natural predators", "Root rot: Soil treatment"],
    }
}

/// Crop-wide advisory used when the soil type is not known
fn crop_advisory(crop: Crop) -> &'static [&'static str] {
    match crop {
        Crop::Wheat => &["Watch for aphids and rust; use neem extract."],
        Crop::Rice => &["Monitor for blast disease; keep fields dry after rain."],
        Crop::Corn => &["Check for stem borers; apply bio-pesticides."],
        Crop::Soybean => &["Beware of leaf miners; rotate crops."],
        Crop::Cotton => &["Check for bollworm; maintain field hygiene."],
    }
}

/// Look up pest advisories for a crop, refined by soil type when given
pub fn lookup_pest_advice(crop: Crop, soil_type: Option<SoilType>) -> PestAdvice {
    match soil_type {
        Some(soil_type) => PestAdvice::Found(soil_advisories(crop, soil_type)),
        None => PestAdvice::Found(crop_advisory(crop)),
    }
}

/// Look up pest advisories from raw form values
///
/// Unknown crop or soil names yield [`PestAdvice::NoData`]; a blank soil
/// name falls back to the crop-wide advisory.
pub fn lookup_pest_advice_by_name(crop: &str, soil: Option<&str>) -> PestAdvice {
    let Ok(crop) = crop.parse::<Crop>() else {
        return PestAdvice::NoData;
    };

    match soil.map(str::trim).filter(|s| !s.is_empty()) {
        None => lookup_pest_advice(crop, None),
        Some(name) => match name.parse::<SoilType>() {
            Ok(soil_type) => lookup_pest_advice(crop, Some(soil_type)),
            Err(_) => PestAdvice::NoData,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheat_on_loamy() {
        let advice = lookup_pest_advice_by_name("Wheat", Some("Loamy"));
        assert_eq!(
            advice.lines(),
            vec!["Aphids: Use neem oil", "Rust: Apply fungicide"]
        );
    }

    #[test]
    fn test_unknown_soil_returns_sentinel() {
        let advice = lookup_pest_advice_by_name("Wheat", Some("Unknown"));
        assert_eq!(advice, PestAdvice::NoData);
        assert_eq!(advice.lines(), vec![NO_PEST_DATA]);
    }

    #[test]
    fn test_unknown_crop_returns_sentinel() {
        assert!(!lookup_pest_advice_by_name("Barley", Some("Clay")).is_found());
    }

    #[test]
    fn test_missing_soil_falls_back_to_crop_table() {
        assert_eq!(
            lookup_pest_advice_by_name("rice", None).lines(),
            vec!["Monitor for blast disease; keep fields dry after rain."]
        );
        assert_eq!(
            lookup_pest_advice_by_name("rice", Some("  ")),
            lookup_pest_advice(Crop::Rice, None)
        );
    }

    #[test]
    fn test_every_pair_has_two_advisories() {
        for crop in Crop::ALL {
            for soil_type in SoilType::ALL {
                assert_eq!(lookup_pest_advice(crop, Some(soil_type)).lines().len(), 2);
            }
        }
    }
}
