use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::api::ApiResponse;

#[derive(Error, Debug)]
pub enum EventscopeError {
    /// A required configuration value is absent or unusable. Fatal at startup.
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// The search backend was unreachable or answered with something that is
    /// not a JSON document. Distinct from a query with zero matches.
    #[error("Resolution failure: {0}")]
    Resolution(String),

    #[error("Hydration failure: {0}")]
    Hydration(String),

    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    /// The keyphrase service was unreachable or returned a malformed body.
    #[error("Extraction failure: {0}")]
    Extraction(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for EventscopeError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

pub type Result<T> = std::result::Result<T, EventscopeError>;
