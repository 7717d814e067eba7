use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::routes::Endpoint;
use crate::upstream::RelayError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Upstream failures of any kind collapse into one 500 carrying the
/// endpoint's fixed message; the cause is only logged.
#[derive(Debug)]
pub enum ApiError {
    /// The relay call failed
    Upstream {
        endpoint: Endpoint,
        source: RelayError,
    },
    /// Inbound body could not be read, or was declared JSON and did not parse
    InvalidBody { status: StatusCode, reason: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Upstream { endpoint, source } => {
                tracing::error!(
                    resource = endpoint.resource.segment(),
                    operation = ?endpoint.operation,
                    "Relay failed: {}",
                    source
                );
                (StatusCode::INTERNAL_SERVER_ERROR, endpoint.failure_message())
            }
            ApiError::InvalidBody { status, reason } => {
                (status, format!("Invalid request body: {}", reason))
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            reason: rejection.body_text(),
        }
    }
}
