//! Per-endpoint health handlers.

use super::types::{EndpointHealthResponse, InvalidateQuery, ReportOutcomeRequest};
use super::{ApiError, AppState};
use crate::health::ServiceStatus;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// GET /v1/tenants/:tenant/services/:service/health - Health of every endpoint.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path((tenant_id, service_name)): Path<(String, String)>,
) -> Result<Json<EndpointHealthResponse>, ApiError> {
    let endpoints = state
        .registry
        .endpoint_health(&tenant_id, &service_name)
        .await?;
    Ok(Json(EndpointHealthResponse {
        tenant_id,
        service_name,
        endpoints,
    }))
}

/// POST /v1/tenants/:tenant/services/:service/health - Report an outcome.
pub async fn report(
    State(state): State<Arc<AppState>>,
    Path((tenant_id, service_name)): Path<(String, String)>,
    body: Result<Json<ReportOutcomeRequest>, JsonRejection>,
) -> Result<Json<ServiceStatus>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    if request.url.is_empty() {
        return Err(ApiError::bad_request("url is required").with_param("url"));
    }

    let status = state
        .registry
        .report_outcome(&tenant_id, &service_name, &request.url, request.healthy)
        .await;
    Ok(Json(status))
}

/// DELETE /v1/tenants/:tenant/services/:service/health?url= - Forget one endpoint's health.
pub async fn invalidate(
    State(state): State<Arc<AppState>>,
    Path((tenant_id, service_name)): Path<(String, String)>,
    Query(query): Query<InvalidateQuery>,
) -> Result<StatusCode, ApiError> {
    let url = query
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::bad_request("url query parameter is required").with_param("url"))?;

    state.registry.invalidate(&tenant_id, &service_name, &url);
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /v1/health - Forget every health record.
pub async fn invalidate_all(State(state): State<Arc<AppState>>) -> StatusCode {
    state.registry.invalidate_all();
    tracing::info!("Health table cleared");
    StatusCode::NO_CONTENT
}
