use axum::extract::State;
use serde::Serialize;

use crate::api::response::ApiResponse;
use crate::api::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    pub status: String,
    pub service: String,
    pub version: String,
    pub database: DatabaseStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct DatabaseStatus {
    pub status: String,
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> ApiResponse<HealthData> {
    let db_status = match state.db.ping().await {
        Ok(()) => "ok",
        Err(error) => {
            tracing::warn!(error = %error, "Store ping failed");
            "error"
        }
    };

    ApiResponse::success(HealthData {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: DatabaseStatus {
            status: db_status.to_string(),
        },
    })
}
