//! WebAssembly module for the Crop Advisory Platform
//!
//! Runs the advisory engine in the browser:
//! - Yield prediction and the full advisory
//! - Soil advice, schedules and pest lookups
//! - Session state persisted in `localStorage`
//! - CSV downloads for the schedule and history
//!
//! Structured values cross the boundary as JSON strings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use shared::{
    advise, decimal_from_f64, derive_soil_advice, generate_schedule, history_to_csv,
    lookup_pest_advice_by_name, schedule_to_csv, validate_soil_reading, AdvisoryError,
    AdvisoryResult, AdvisoryStore, FarmInput, HistoryRecord, KeyValueStore, ScheduleEntry,
    SoilReading, YieldResult,
};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("crop advisory engine loaded"));
}

fn to_js(err: AdvisoryError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> AdvisoryResult<String> {
    serde_json::to_string(value).map_err(|e| AdvisoryError::Export(format!("JSON error: {}", e)))
}

fn parse_soil(soil_json: &str) -> AdvisoryResult<SoilReading> {
    serde_json::from_str(soil_json)
        .map_err(|e| AdvisoryError::invalid("soil_reading", format!("Invalid soil JSON: {}", e)))
}

fn parse_optional_soil(soil_json: Option<String>) -> AdvisoryResult<Option<SoilReading>> {
    soil_json
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_soil)
        .transpose()
}

fn farm_input(crop: &str, soil: &str, area: f64, rainfall: f64) -> AdvisoryResult<FarmInput> {
    FarmInput::parse(
        crop,
        soil,
        decimal_from_f64("area", area)?,
        decimal_from_f64("rainfall", rainfall)?,
    )
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

// ============================================================================
// Stateless calls
// ============================================================================

fn predict_json(
    crop: &str,
    soil: &str,
    area: f64,
    rainfall: f64,
    soil_json: Option<String>,
) -> AdvisoryResult<String> {
    let input = farm_input(crop, soil, area, rainfall)?;
    let reading = parse_optional_soil(soil_json)?;
    to_json(&advise(&input, reading.as_ref())?)
}

/// Full advisory for one farm as JSON
#[wasm_bindgen]
pub fn predict(
    crop: &str,
    soil: &str,
    area: f64,
    rainfall: f64,
    soil_json: Option<String>,
) -> Result<String, JsValue> {
    predict_json(crop, soil, area, rainfall, soil_json).map_err(to_js)
}

fn yield_result(value: f64) -> AdvisoryResult<YieldResult> {
    decimal_from_f64("yield", value).map(YieldResult::from_value)
}

/// Yield category name for a value in tons
#[wasm_bindgen]
pub fn classify_yield(value: f64) -> Result<String, JsValue> {
    yield_result(value)
        .map(|result| result.category.to_string())
        .map_err(to_js)
}

/// Gauge fill for a yield value, 0 to 100
#[wasm_bindgen]
pub fn gauge_percent(value: f64) -> Result<f64, JsValue> {
    yield_result(value)
        .map(|result| to_f64(result.gauge_percent()))
        .map_err(to_js)
}

fn advice_messages(reading: &SoilReading) -> AdvisoryResult<String> {
    let messages: Vec<&str> = derive_soil_advice(reading)
        .iter()
        .map(|a| a.message())
        .collect();
    to_json(&messages)
}

fn soil_advice_json(soil_json: &str) -> AdvisoryResult<String> {
    let reading = parse_soil(soil_json)?;
    validate_soil_reading(&reading)?;
    advice_messages(&reading)
}

/// Soil advice messages for a reading, as a JSON array of strings
#[wasm_bindgen]
pub fn soil_advice(soil_json: &str) -> Result<String, JsValue> {
    soil_advice_json(soil_json).map_err(to_js)
}

fn schedule_json(yield_value: Option<f64>, soil_json: Option<String>) -> AdvisoryResult<String> {
    let yield_value = yield_value
        .map(|v| decimal_from_f64("yield", v))
        .transpose()?;
    let reading = parse_optional_soil(soil_json)?;
    to_json(&generate_schedule(yield_value, reading.as_ref()))
}

/// Weekly schedule as JSON, empty when either input is missing
#[wasm_bindgen]
pub fn schedule(yield_value: Option<f64>, soil_json: Option<String>) -> Result<String, JsValue> {
    schedule_json(yield_value, soil_json).map_err(to_js)
}

fn schedule_csv_from_json(schedule_json: &str) -> AdvisoryResult<String> {
    let entries: Vec<ScheduleEntry> = serde_json::from_str(schedule_json)
        .map_err(|e| AdvisoryError::invalid("schedule", format!("Invalid schedule JSON: {}", e)))?;
    schedule_to_csv(&entries)
}

/// CSV text for a schedule previously returned by [`schedule`]
#[wasm_bindgen]
pub fn schedule_csv(schedule_json: &str) -> Result<String, JsValue> {
    schedule_csv_from_json(schedule_json).map_err(to_js)
}

/// Pest advisory lines for a crop and optional soil type, as a JSON array
#[wasm_bindgen]
pub fn pest_advice(crop: &str, soil: Option<String>) -> String {
    let lines = lookup_pest_advice_by_name(crop, soil.as_deref()).lines();
    serde_json::to_string(&lines).unwrap_or_else(|_| "[]".to_string())
}

// ============================================================================
// Browser storage
// ============================================================================

/// `localStorage` as a [`KeyValueStore`]
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> AdvisoryResult<Self> {
        let window = web_sys::window()
            .ok_or_else(|| AdvisoryError::Storage("no window available".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| AdvisoryError::Storage(format!("{:?}", e)))?
            .ok_or_else(|| AdvisoryError::Storage("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> AdvisoryResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| AdvisoryError::Storage(format!("{:?}", e)))
    }

    fn set(&mut self, key: &str, value: &str) -> AdvisoryResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| AdvisoryError::Storage(format!("{:?}", e)))
    }

    fn remove(&mut self, key: &str) -> AdvisoryResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| AdvisoryError::Storage(format!("{:?}", e)))
    }
}

fn now() -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64)
}

/// Soil reading and prediction history for the current browser profile
#[wasm_bindgen]
pub struct AdvisorySession {
    store: AdvisoryStore<LocalStorage>,
}

#[wasm_bindgen]
impl AdvisorySession {
    /// Open the session, reading any previously saved state
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<AdvisorySession, JsValue> {
        let store = LocalStorage::open()
            .and_then(AdvisoryStore::load)
            .map_err(to_js)?;
        web_sys::console::debug_1(&JsValue::from_str(&format!(
            "restored {} history records",
            store.history().len()
        )));
        Ok(Self { store })
    }

    /// Predict with the saved soil reading and append the result to history
    pub fn predict(
        &mut self,
        crop: &str,
        soil: &str,
        area: f64,
        rainfall: f64,
    ) -> Result<String, JsValue> {
        let input = farm_input(crop, soil, area, rainfall).map_err(to_js)?;
        let advisory = advise(&input, self.store.soil()).map_err(to_js)?;
        self.store
            .record(HistoryRecord::new(&input, &advisory.yield_result, now()))
            .map_err(to_js)?;
        to_json(&advisory).map_err(to_js)
    }

    /// Save a soil reading and return its advice messages
    pub fn save_soil(&mut self, soil_json: &str) -> Result<String, JsValue> {
        let reading = parse_soil(soil_json).map_err(to_js)?;
        self.store.save_soil(&reading).map_err(to_js)?;
        advice_messages(&reading).map_err(to_js)
    }

    /// Saved soil reading as JSON, `null` when none
    pub fn soil(&self) -> Result<String, JsValue> {
        to_json(&self.store.soil()).map_err(to_js)
    }

    /// Schedule for the latest prediction, empty when there is none
    pub fn latest_schedule(&self) -> Result<String, JsValue> {
        let latest = self.store.history().latest().map(|r| r.yield_tons);
        let reading = self.store.soil().cloned().unwrap_or_default();
        to_json(&generate_schedule(latest, Some(&reading))).map_err(to_js)
    }

    /// History records as JSON, optionally filtered by crop or soil name
    pub fn history(&self, filter: Option<String>) -> Result<String, JsValue> {
        let json = match filter.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
            Some(query) => to_json(&self.store.history().filter(query)),
            None => to_json(self.store.history()),
        };
        json.map_err(to_js)
    }

    pub fn history_csv(&self) -> Result<String, JsValue> {
        history_to_csv(self.store.history().records()).map_err(to_js)
    }

    /// Category counts and chart series as JSON
    pub fn summary(&self) -> Result<String, JsValue> {
        let history = self.store.history();
        to_json(&serde_json::json!({
            "counts": history.category_counts(),
            "series": history.chart_series(),
        }))
        .map_err(to_js)
    }

    pub fn clear_history(&mut self) -> Result<(), JsValue> {
        self.store.clear_history().map_err(to_js)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_json() {
        let json = predict_json("Corn", "Black", 2.0, 30.0, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["yield"]["value"], "8.80");
        assert_eq!(value["soil_source"], "default");
    }

    #[test]
    fn test_predict_rejects_zero_area() {
        let err = predict_json("Corn", "Black", 0.0, 30.0, None).unwrap_err();
        assert_eq!(err.field(), Some("area"));
    }

    #[test]
    fn test_blank_soil_json_is_absent() {
        assert!(parse_optional_soil(Some("  ".to_string())).unwrap().is_none());
        assert!(parse_optional_soil(Some("{".to_string())).is_err());
    }

    #[test]
    fn test_classify_yield() {
        let category = |v: f64| yield_result(v).unwrap().category.to_string();
        assert_eq!(category(3.0), "Low");
        assert_eq!(category(7.0), "Medium");
        assert_eq!(category(7.01), "High");
    }

    #[test]
    fn test_yield_rejects_non_finite_values() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = yield_result(value).unwrap_err();
            assert_eq!(err.field(), Some("yield"));
        }
    }

    #[test]
    fn test_gauge_percent() {
        let gauge = |v: f64| to_f64(yield_result(v).unwrap().gauge_percent());
        assert!((gauge(4.2) - 42.0).abs() < 0.001);
        assert!((gauge(12.0) - 100.0).abs() < 0.001);
    }

    #[test]
    fn test_advice_messages_from_parsed_reading() {
        let reading = SoilReading::new(
            Decimal::from(8),
            Decimal::new(2, 1),
            Decimal::ONE,
            Decimal::ONE,
        );
        let messages: Vec<String> =
            serde_json::from_str(&advice_messages(&reading).unwrap()).unwrap();
        assert_eq!(
            messages,
            vec![
                "Soil is alkaline. Add sulfur.".to_string(),
                "Low Nitrogen: Use nitrogen fertilizer.".to_string(),
            ]
        );
    }

    #[test]
    fn test_soil_advice_json() {
        let json = soil_advice_json(r#"{"ph":"5.0","nitrogen":"2","phosphorus":"1","potassium":"1"}"#)
            .unwrap();
        let messages: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("lime"));
    }

    #[test]
    fn test_schedule_json_requires_both_inputs() {
        assert_eq!(schedule_json(None, None).unwrap(), "[]");
        let json = schedule_json(
            Some(5.0),
            Some(r#"{"ph":7,"nitrogen":0,"phosphorus":0,"potassium":0}"#.to_string()),
        )
        .unwrap();
        let entries: Vec<ScheduleEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries.len(), 7);

        let csv = schedule_csv_from_json(&json).unwrap();
        assert!(csv.starts_with("Day,Task,Notes\n\"Day 1\""));
    }

    #[test]
    fn test_pest_advice_sentinel() {
        let lines: Vec<String> = serde_json::from_str(&pest_advice("Barley", None)).unwrap();
        assert_eq!(lines, vec![shared::NO_PEST_DATA.to_string()]);
    }
}
