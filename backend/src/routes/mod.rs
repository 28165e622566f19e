//! Route definitions for the Crop Advisory server

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/predict", post(handlers::predict))
        .nest("/soil", soil_routes())
        .nest("/schedule", schedule_routes())
        .route("/pests", get(handlers::get_pest_advice))
        .nest("/history", history_routes())
}

/// Soil reading routes
fn soil_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_soil).put(handlers::save_soil))
        .route("/advice", post(handlers::soil_advice))
}

/// Fertilizer and irrigation schedule routes
fn schedule_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::get_latest_schedule).post(handlers::create_schedule),
    )
}

/// Prediction history routes
fn history_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_history).delete(handlers::clear_history),
        )
        .route("/summary", get(handlers::history_summary))
}
