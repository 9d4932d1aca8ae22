//! Endpoint resolution handler.

use super::types::ResolveQuery;
use super::{ApiError, AppState};
use crate::logging::resolution_status;
use crate::routing::FallbackChainResult;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use std::time::Instant;

/// GET /v1/tenants/:tenant/services/:service/resolve - Resolve a URL.
///
/// `?health=true` selects the health-aware fallback walk over the tenant's
/// active config. Failures carry the resolution trace in the error body.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Path((tenant_id, service_name)): Path<(String, String)>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<FallbackChainResult>, ApiError> {
    let start = Instant::now();

    let result = if query.health {
        state
            .registry
            .resolve_with_health(&tenant_id, &service_name)
            .await
    } else {
        state.registry.resolve(&tenant_id, &service_name).await
    };

    let elapsed = start.elapsed();
    metrics::histogram!("waypoint_resolution_duration_seconds",
        "service" => service_name.clone()
    )
    .record(elapsed.as_secs_f64());

    let (status, error_message) = resolution_status(&result);
    tracing::info!(
        tenant_id = %tenant_id,
        service = %service_name,
        health_aware = query.health,
        status = status,
        error_message = error_message.as_deref(),
        latency_ms = elapsed.as_millis() as u64,
        "Resolve request"
    );

    Ok(Json(result?))
}
