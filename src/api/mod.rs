//! # Registry HTTP API
//!
//! Thin JSON transport over [`ServiceRegistry`]: handlers translate between
//! HTTP and registry calls and hold no routing logic of their own.
//!
//! ## Endpoints
//!
//! - `GET /health` - Liveness with a health-table summary
//! - `GET /v1/tenants/:tenant/services` - List a tenant's configs
//! - `GET|PUT|DELETE /v1/tenants/:tenant/services/:service` - Config CRUD
//! - `GET /v1/tenants/:tenant/services/:service/resolve[?health=true]` - Resolve a URL
//! - `GET|POST|DELETE /v1/tenants/:tenant/services/:service/health` - Endpoint health
//! - `DELETE /v1/health` - Clear the health table
//! - `GET /v1/defaults`, `GET|PUT /v1/defaults/:service` - System defaults
//! - `GET /metrics`, `GET /v1/stats` - Prometheus and JSON metrics
//!
//! ## Example
//!
//! ```no_run
//! use waypoint::api::{create_router, AppState};
//! use waypoint::config::WaypointConfig;
//! use waypoint::registry::ServiceRegistry;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(ServiceRegistry::in_memory());
//! let config = Arc::new(WaypointConfig::default());
//!
//! let state = Arc::new(AppState::new(registry, config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:7600").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors use a single envelope; resolve failures add the trace:
//! ```json
//! {
//!   "error": {
//!     "message": "no healthy endpoint available for service 'billing'",
//!     "type": "server_error",
//!     "code": "service_unavailable",
//!     "trace": { "attempted_urls": ["http://billing-1:8080"], "success": false }
//!   }
//! }
//! ```

mod defaults;
mod endpoints;
pub mod error;
mod health;
mod resolve;
mod services;
pub mod types;

pub use error::{ApiError, ApiErrorBody};
pub use types::*;

use crate::config::WaypointConfig;
use crate::metrics::MetricsCollector;
use crate::registry::ServiceRegistry;
use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MB).
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub registry: Arc<ServiceRegistry>,
    pub config: Arc<WaypointConfig>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    /// Metrics collector for observability
    pub metrics_collector: Arc<MetricsCollector>,
}

impl AppState {
    /// Create new application state with the given registry and configuration.
    pub fn new(registry: Arc<ServiceRegistry>, config: Arc<WaypointConfig>) -> Self {
        let start_time = Instant::now();

        // Reuse an existing global recorder if one is already installed (tests)
        let prometheus_handle = crate::metrics::setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("Metrics already initialized, creating new handle: {}", e);
            crate::metrics::detached_handle()
        });

        let metrics_collector = Arc::new(MetricsCollector::new(
            Arc::clone(&registry),
            start_time,
            prometheus_handle,
        ));

        Self {
            registry,
            config,
            start_time,
            metrics_collector,
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds.max(1));

    Router::new()
        .route("/health", get(health::handle))
        .route("/v1/health", delete(endpoints::invalidate_all))
        .route("/v1/tenants/:tenant/services", get(services::list))
        .route(
            "/v1/tenants/:tenant/services/:service",
            get(services::get)
                .put(services::upsert)
                .delete(services::delete),
        )
        .route(
            "/v1/tenants/:tenant/services/:service/resolve",
            get(resolve::handle),
        )
        .route(
            "/v1/tenants/:tenant/services/:service/health",
            get(endpoints::get)
                .post(endpoints::report)
                .delete(endpoints::invalidate),
        )
        .route("/v1/defaults", get(defaults::list))
        .route(
            "/v1/defaults/:service",
            get(defaults::get).put(defaults::upsert),
        )
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .route("/v1/stats", get(crate::metrics::handler::stats_handler))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
