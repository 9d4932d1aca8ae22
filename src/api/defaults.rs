//! System default config handlers.

use super::{ApiError, AppState};
use crate::model::DefaultServiceConfig;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;

/// GET /v1/defaults - List every default config.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DefaultServiceConfig>>, ApiError> {
    Ok(Json(state.registry.list_default_configs().await?))
}

/// GET /v1/defaults/:service - Fetch one default config.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(service_name): Path<String>,
) -> Result<Json<DefaultServiceConfig>, ApiError> {
    Ok(Json(state.registry.get_default_config(&service_name).await?))
}

/// PUT /v1/defaults/:service - Create or replace a default config.
pub async fn upsert(
    State(state): State<Arc<AppState>>,
    Path(service_name): Path<String>,
    body: Result<Json<DefaultServiceConfig>, JsonRejection>,
) -> Result<Json<DefaultServiceConfig>, ApiError> {
    let Json(mut config) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;
    config.service_name = service_name;

    Ok(Json(state.registry.upsert_default_config(config).await?))
}
