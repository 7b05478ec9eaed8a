//! HTTP error responses
//!
//! Every failure leaves the service as `{"detail": "..."}` with the status
//! from the crate's single kind-to-status table.

use crate::Error;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::warn;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let detail = self.detail();

        warn!("Request failed with {}: {}", status.as_u16(), detail);

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::invalid_request(rejection.body_text())
    }
}
