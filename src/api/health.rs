//! Liveness endpoint handler.

use super::types::HealthResponse;
use crate::api::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// GET /health - Report liveness and a summary of the health table.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let endpoints = state.metrics_collector.update_health_gauges();

    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        endpoints,
    })
}
