use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// Health response structure
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    pub timestamp: String,
}

/// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// GET /health - Health check endpoint
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    let (status, store) = match state.store.health_check().await {
        Ok(true) => ("healthy", "connected"),
        Ok(false) => ("unhealthy", "error"),
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            ("unhealthy", "disconnected")
        }
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        store: store.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    }))
}
