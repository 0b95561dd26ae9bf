//! # Response Envelope & Error Contract
//!
//! Every JSON endpoint returns an [`ApiResponse<T>`] envelope:
//!
//! ```json
//! {
//!   "data": { ... },                                        // on success
//!   "error": { "code": "upstream_error", "message": "..." }  // on error
//! }
//! ```
//!
//! Failures of the search backend or the key-phrase service surface as
//! `502 upstream_error`. Store and other internal failures surface as
//! `500 internal_error` with a generic message; the real error is logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EventscopeError;

/// Machine-readable error code, serialized as a snake_case string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed request parameters. HTTP 400.
    InvalidRequest,
    /// A remote dependency failed or answered with garbage. HTTP 502.
    UpstreamError,
    /// Anything else. HTTP 500.
    InternalError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::UpstreamError => StatusCode::BAD_GATEWAY,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::UpstreamError => write!(f, "upstream_error"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// Not serialized on the wire.
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: StatusCode::OK,
        }
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(_) => {
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<EventscopeError> for ApiResponse<T> {
    fn from(err: EventscopeError) -> Self {
        match err {
            EventscopeError::Validation(ref msg) => {
                ApiResponse::error(ErrorCode::InvalidRequest, msg.clone())
            }

            ref upstream @ (EventscopeError::Resolution(_)
            | EventscopeError::Extraction(_)
            | EventscopeError::Http(_)) => {
                tracing::warn!(error = %upstream, "Upstream failure mapped to response");
                let message = match upstream {
                    EventscopeError::Resolution(_) => "Search backend request failed",
                    EventscopeError::Extraction(_) => "Key-phrase service request failed",
                    _ => "Upstream request failed",
                };
                ApiResponse::error(ErrorCode::UpstreamError, message)
            }

            ref internal @ (EventscopeError::ConfigurationMissing(_)
            | EventscopeError::Config(_)
            | EventscopeError::Hydration(_)
            | EventscopeError::Database(_)
            | EventscopeError::Json(_)
            | EventscopeError::Csv(_)
            | EventscopeError::Io(_)
            | EventscopeError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}
