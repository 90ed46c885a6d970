//! ==============================================================================
//! error.rs - ingestion errors
//! ==============================================================================
//!
//! every variant answers the device the same way:
//!     400 {"status": "error", "message": "Invalid data"}
//! the variants only exist so the log line says what was actually wrong.
//!
//! ==============================================================================

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::domain::StatusResponse;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("request is not JSON (content-type: {0})")]
    NotJson(String),
    #[error("body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "rejected reading");
        (StatusCode::BAD_REQUEST, Json(StatusResponse::INVALID)).into_response()
    }
}
