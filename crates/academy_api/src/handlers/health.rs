//! Health check handler

use crate::models::HealthResponse;
use crate::state::AppState;
use axum::extract::State;
use axum::Json;

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: academy_core::core_version().to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
