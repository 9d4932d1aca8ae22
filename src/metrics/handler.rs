//! # Metrics HTTP Handlers
//!
//! Axum handlers for metrics endpoints.

use super::{EndpointStats, StatsResponse, UnhealthyEndpoint};
use crate::api::AppState;
use crate::health::ServiceStatus;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

/// Handler for GET /metrics endpoint (Prometheus text format).
///
/// Always returns 200 with the Prometheus content type, even before any
/// metric has been recorded.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.metrics_collector.update_health_gauges();

    let metrics = state.metrics_collector.render_metrics();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        metrics,
    )
}

/// Handler for GET /v1/stats endpoint (JSON format).
pub async fn stats_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let collector = &state.metrics_collector;
    let statuses = collector.registry().all_statuses();
    collector.publish_health_gauges(&statuses);

    Json(build_stats(collector.uptime_seconds(), &statuses))
}

/// Counts and the unhealthy list, both taken from the same snapshot.
pub fn build_stats(uptime_seconds: u64, statuses: &[ServiceStatus]) -> StatsResponse {
    StatsResponse {
        uptime_seconds,
        endpoints: compute_endpoint_stats(statuses),
        unhealthy: compute_unhealthy(statuses),
    }
}

/// Count tracked, healthy and unhealthy endpoints.
pub fn compute_endpoint_stats(statuses: &[ServiceStatus]) -> EndpointStats {
    let unhealthy = statuses.iter().filter(|s| !s.is_healthy).count();
    EndpointStats {
        tracked: statuses.len(),
        healthy: statuses.len() - unhealthy,
        unhealthy,
    }
}

/// Unhealthy endpoints, sorted by tenant, service, then URL.
pub fn compute_unhealthy(statuses: &[ServiceStatus]) -> Vec<UnhealthyEndpoint> {
    let mut unhealthy: Vec<UnhealthyEndpoint> = statuses
        .iter()
        .filter(|s| !s.is_healthy)
        .map(|s| UnhealthyEndpoint {
            tenant_id: s.tenant_id.clone(),
            service_name: s.service_name.clone(),
            url: s.endpoint_url.clone(),
            consecutive_fails: s.consecutive_fails,
            last_error: s.last_error.clone(),
        })
        .collect();

    unhealthy.sort_by(|a, b| {
        (&a.tenant_id, &a.service_name, &a.url).cmp(&(&b.tenant_id, &b.service_name, &b.url))
    });
    unhealthy
}
