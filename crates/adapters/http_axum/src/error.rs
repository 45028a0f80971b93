//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use heatgate_domain::error::HeatGateError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    detail: String,
}

/// Maps [`HeatGateError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HeatGateError);

impl From<HeatGateError> for ApiError {
    fn from(err: HeatGateError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            HeatGateError::Validation(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            HeatGateError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            HeatGateError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            HeatGateError::Vendor(_) => {
                tracing::error!(error = %self.0.describe(), "heating API error");
                (
                    StatusCode::BAD_GATEWAY,
                    "upstream heating API error".to_string(),
                )
            }
            HeatGateError::Fatal(_) => {
                tracing::error!(error = %self.0.describe(), "fatal error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service unavailable".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { detail: message })).into_response()
    }
}
