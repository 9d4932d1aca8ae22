//! Tenant service config handlers.

use super::types::ServiceListResponse;
use super::{ApiError, AppState};
use crate::model::ServiceConfig;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

/// GET /v1/tenants/:tenant/services - List a tenant's configs.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> Result<Json<ServiceListResponse>, ApiError> {
    let services = state.registry.list_tenant_services(&tenant_id).await?;
    Ok(Json(ServiceListResponse {
        tenant_id,
        services,
    }))
}

/// GET /v1/tenants/:tenant/services/:service - Fetch one config.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path((tenant_id, service_name)): Path<(String, String)>,
) -> Result<Json<ServiceConfig>, ApiError> {
    let config = state
        .registry
        .get_service_config(&tenant_id, &service_name)
        .await?;
    Ok(Json(config))
}

/// PUT /v1/tenants/:tenant/services/:service - Create or replace a config.
///
/// The path identifies the config; tenant and service keys in the body are
/// overwritten.
pub async fn upsert(
    State(state): State<Arc<AppState>>,
    Path((tenant_id, service_name)): Path<(String, String)>,
    body: Result<Json<ServiceConfig>, JsonRejection>,
) -> Result<Json<ServiceConfig>, ApiError> {
    let Json(mut config) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    config.tenant_id = tenant_id;
    config.service_name = service_name;

    let stored = state.registry.upsert_service_config(config).await?;
    Ok(Json(stored))
}

/// DELETE /v1/tenants/:tenant/services/:service - Remove a config.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path((tenant_id, service_name)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state
        .registry
        .delete_service_config(&tenant_id, &service_name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
