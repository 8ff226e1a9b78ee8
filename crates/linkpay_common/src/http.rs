use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{HttpStatusCode, LinkpayError};

// Include the client module
pub mod client;

/// Extension trait for LinkpayError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for LinkpayError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Forward provider errors structurally; everything else as a message.
        let body = match self.provider_error() {
            Some(provider) => Json(json!({ "error": provider })),
            None => Json(json!({ "error": self.to_string() })),
        };

        (status_code, body).into_response()
    }
}

impl IntoResponse for LinkpayError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
