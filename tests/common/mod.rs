//! Shared test utilities for Waypoint integration tests.
//!
//! Provides builders for registries, routers and requests to reduce
//! duplication across test files.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::Arc;
use waypoint::api::{create_router, AppState};
use waypoint::config::WaypointConfig;
use waypoint::model::{DefaultServiceConfig, Endpoint, ServiceConfig};
use waypoint::registry::ServiceRegistry;

// =============================================================================
// Config Builders
// =============================================================================

/// Tenant config with a primary and the given fallback URLs, in order.
pub fn make_service(tenant: &str, service: &str, primary: &str, fallbacks: &[&str]) -> ServiceConfig {
    fallbacks.iter().enumerate().fold(
        ServiceConfig::new(tenant, service, Endpoint::new(primary)),
        |config, (i, url)| config.with_fallback(Endpoint::new(*url).with_priority(i as i32 + 1)),
    )
}

// =============================================================================
// Registry / Router Builders
// =============================================================================

/// Registry seeded with the given configs.
pub async fn make_registry(
    services: Vec<ServiceConfig>,
    defaults: Vec<DefaultServiceConfig>,
) -> Arc<ServiceRegistry> {
    let registry = ServiceRegistry::in_memory();
    for default in defaults {
        registry.upsert_default_config(default).await.unwrap();
    }
    for service in services {
        registry.upsert_service_config(service).await.unwrap();
    }
    Arc::new(registry)
}

/// Router over an existing registry with default config.
pub fn make_app(registry: Arc<ServiceRegistry>) -> axum::Router {
    let config = Arc::new(WaypointConfig::default());
    let state = Arc::new(AppState::new(registry, config));
    create_router(state)
}

/// Router over an empty registry.
pub fn make_empty_app() -> axum::Router {
    make_app(Arc::new(ServiceRegistry::in_memory()))
}

// =============================================================================
// Request Helpers
// =============================================================================

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
