//! Liveness endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::AppState;

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

/// GET /api/health - Report that the API is up
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Slurp API is running".to_string(),
        timestamp: state.clock.now().as_datetime().to_rfc3339(),
    })
}
