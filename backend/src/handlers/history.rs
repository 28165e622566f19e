//! History handlers: listing, export, summary and reset

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use shared::{history_to_csv, HISTORY_FILENAME};

use super::{csv_attachment, ApiResponse};
use crate::error::AppResult;
use crate::services::HistorySummary;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub filter: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub removed: usize,
}

/// List history records, optionally filtered, as JSON or CSV
pub async fn list_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Response> {
    let filter = query.filter.as_deref().filter(|f| !f.trim().is_empty());
    let records = state.advisory_service().history(filter).await;

    if query
        .format
        .as_deref()
        .is_some_and(|f| f.eq_ignore_ascii_case("csv"))
    {
        let csv = history_to_csv(&records)?;
        Ok(csv_attachment(HISTORY_FILENAME, csv))
    } else {
        Ok(Json(ApiResponse::ok(records)).into_response())
    }
}

/// Remove every history record
pub async fn clear_history(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ClearedResponse>>> {
    let removed = state.advisory_service().clear_history().await?;
    Ok(Json(ApiResponse::ok(ClearedResponse { removed })))
}

/// Category counts and chart series for the dashboard
pub async fn history_summary(State(state): State<AppState>) -> Json<ApiResponse<HistorySummary>> {
    let summary = state.advisory_service().summary().await;
    Json(ApiResponse::ok(summary))
}
