//! HTTP handlers for the Crop Advisory server

pub mod advisory;
pub mod health;
pub mod history;

pub use advisory::*;
pub use health::*;
pub use history::*;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Success envelope: `{"success": true, "data": ...}`
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response format selector shared by the export-capable endpoints
#[derive(serde::Deserialize, Default)]
pub struct FormatQuery {
    pub format: Option<String>, // "json" or "csv"
}

impl FormatQuery {
    pub fn wants_csv(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|f| f.eq_ignore_ascii_case("csv"))
    }
}

/// CSV body served as a file download
pub(crate) fn csv_attachment(filename: &str, body: String) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
