//! HTTP handlers for prediction, soil, schedule and pest endpoints

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::{
    lookup_pest_advice_by_name, schedule_to_csv, Advisory, FarmInput, PestAdvice, ScheduleEntry,
    SoilAdvice, SoilReading, SCHEDULE_FILENAME,
};

use super::{csv_attachment, ApiResponse, FormatQuery};
use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub crop: String,
    pub soil: String,
    pub area: Decimal,
    pub rainfall: Decimal,
    pub soil_reading: Option<SoilReading>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    #[serde(rename = "yield")]
    pub yield_value: Decimal,
    pub soil_reading: Option<SoilReading>,
}

#[derive(Debug, Deserialize)]
pub struct PestQuery {
    pub crop: String,
    pub soil: Option<String>,
}

/// One soil advice line as shown in the soil panel
#[derive(Debug, Serialize)]
pub struct SoilAdviceLine {
    pub kind: SoilAdvice,
    pub message: &'static str,
    pub warning: bool,
}

impl From<SoilAdvice> for SoilAdviceLine {
    fn from(advice: SoilAdvice) -> Self {
        Self {
            kind: advice,
            message: advice.message(),
            warning: advice.is_warning(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SoilResponse {
    pub reading: SoilReading,
    pub advice: Vec<SoilAdviceLine>,
}

#[derive(Debug, Serialize)]
pub struct PestResponse {
    pub crop: String,
    pub soil: Option<String>,
    #[serde(flatten)]
    pub result: PestAdvice,
    pub lines: Vec<&'static str>,
}

fn advice_lines(advice: Vec<SoilAdvice>) -> Vec<SoilAdviceLine> {
    advice.into_iter().map(SoilAdviceLine::from).collect()
}

/// Predict yield and build the full advisory
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> AppResult<Json<ApiResponse<Advisory>>> {
    let input = FarmInput::parse(&request.crop, &request.soil, request.area, request.rainfall)?;
    let advisory = state
        .advisory_service()
        .predict(input, request.soil_reading)
        .await?;
    Ok(Json(ApiResponse::ok(advisory)))
}

/// Get the stored soil reading, `null` when none has been saved
pub async fn get_soil(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Option<SoilReading>>>> {
    let soil = state.advisory_service().soil().await;
    Ok(Json(ApiResponse::ok(soil)))
}

/// Store a soil reading and return its advice
pub async fn save_soil(
    State(state): State<AppState>,
    Json(reading): Json<SoilReading>,
) -> AppResult<Json<ApiResponse<SoilResponse>>> {
    let advice = state.advisory_service().save_soil(reading.clone()).await?;
    Ok(Json(ApiResponse::ok(SoilResponse {
        reading,
        advice: advice_lines(advice),
    })))
}

/// Advice for a reading without storing it
pub async fn soil_advice(
    State(state): State<AppState>,
    Json(reading): Json<SoilReading>,
) -> AppResult<Json<ApiResponse<SoilResponse>>> {
    let advice = state.advisory_service().soil_advice(&reading)?;
    Ok(Json(ApiResponse::ok(SoilResponse {
        reading,
        advice: advice_lines(advice),
    })))
}

/// Build a 7-day schedule for a given yield
pub async fn create_schedule(
    State(state): State<AppState>,
    Json(request): Json<ScheduleRequest>,
) -> AppResult<Json<ApiResponse<Vec<ScheduleEntry>>>> {
    let schedule = state
        .advisory_service()
        .schedule(request.yield_value, request.soil_reading)
        .await?;
    Ok(Json(ApiResponse::ok(schedule)))
}

/// Schedule for the latest prediction, as JSON or a CSV download
pub async fn get_latest_schedule(
    State(state): State<AppState>,
    Query(query): Query<FormatQuery>,
) -> AppResult<Response> {
    let schedule = state.advisory_service().latest_schedule().await?;

    if query.wants_csv() {
        let csv = schedule_to_csv(&schedule)?;
        Ok(csv_attachment(SCHEDULE_FILENAME, csv))
    } else {
        Ok(Json(ApiResponse::ok(schedule)).into_response())
    }
}

/// Pest advisories for a crop and optional soil type
pub async fn get_pest_advice(Query(query): Query<PestQuery>) -> Json<ApiResponse<PestResponse>> {
    let result = lookup_pest_advice_by_name(&query.crop, query.soil.as_deref());
    Json(ApiResponse::ok(PestResponse {
        crop: query.crop,
        soil: query.soil,
        lines: result.lines(),
        result,
    }))
}
