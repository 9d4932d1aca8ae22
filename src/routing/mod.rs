//! Endpoint resolution for tenant services
//!
//! Turns a `(tenant, service)` pair into a concrete URL. Tenant overrides are
//! tried first, choosing among the config's active endpoints with its
//! load-balancing strategy, and the system-wide default for the service is
//! used when no override resolves. A separate health-aware walk follows the
//! priority order of a config and skips endpoints the health tracker has
//! marked unhealthy.
//!
//! Resolution never retries. Callers decide their own retry policy.

use std::sync::Arc;
use std::time::Duration;

pub mod error;
pub mod result;
pub mod selection;
pub mod strategies;


pub use error::ResolveError;
pub use result::FallbackChainResult;
pub use selection::RoundRobinCursors;
pub use strategies::LoadBalanceStrategy;

use crate::health::HealthTracker;
use crate::model::{Endpoint, ServiceConfig, ServiceKey};
use crate::store::{self, ConfigStore};

/// Default bound on a single store lookup during resolution.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(2000);

const NOT_FOUND_MESSAGE: &str = "no configuration found for service";
const UNAVAILABLE_MESSAGE: &str = "no healthy endpoints available";

/// Resolver picks the endpoint a caller should use for a tenant's service
pub struct Resolver {
    /// Source of tenant and default configs
    store: Arc<dyn ConfigStore>,

    /// Shared endpoint health table
    health: Arc<HealthTracker>,

    /// Round-robin state, independent of the health table
    cursors: RoundRobinCursors,

    /// Bound applied to each store lookup
    store_timeout: Duration,
}

impl Resolver {
    /// Create a resolver over the given store and health tracker
    pub fn new(store: Arc<dyn ConfigStore>, health: Arc<HealthTracker>) -> Self {
        Self {
            store,
            health,
            cursors: RoundRobinCursors::new(),
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Override the per-lookup store timeout
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }

    pub fn health(&self) -> &Arc<HealthTracker> {
        &self.health
    }

    /// Resolve a URL for `(tenant_id, service_name)`.
    ///
    /// Uses the resolver's default store timeout for each lookup.
    pub async fn resolve(
        &self,
        tenant_id: &str,
        service_name: &str,
    ) -> Result<FallbackChainResult, ResolveError> {
        self.resolve_within(tenant_id, service_name, self.store_timeout)
            .await
    }

    /// Resolve a URL, bounding each store lookup by `deadline`.
    ///
    /// The deadline only covers the store fetches. Once a config is in hand,
    /// selection is in-memory and runs to completion.
    pub async fn resolve_within(
        &self,
        tenant_id: &str,
        service_name: &str,
        deadline: Duration,
    ) -> Result<FallbackChainResult, ResolveError> {
        let mut trace = FallbackChainResult::new(tenant_id, service_name);

        let tenant_lookup = store::with_timeout(
            deadline,
            self.store.find_active_config(tenant_id, service_name),
        )
        .await;

        match tenant_lookup {
            Ok(Some(config)) => {
                if let Some((url, endpoint)) = self.select_endpoint(&config) {
                    tracing::debug!(
                        tenant_id = tenant_id,
                        service = service_name,
                        url = %url,
                        strategy = %config.load_balance_strategy,
                        "Resolved tenant endpoint"
                    );
                    trace.resolved(url, endpoint, false);
                    record_resolution(service_name, "tenant");
                    return Ok(trace);
                }
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    tenant_id = tenant_id,
                    service = service_name,
                    error = %e,
                    "Tenant config lookup failed, trying default"
                );
            }
        }

        let default_lookup =
            store::with_timeout(deadline, self.store.find_default_config(service_name)).await;

        match default_lookup {
            Ok(Some(default)) if !default.service_url.is_empty() => {
                tracing::debug!(
                    tenant_id = tenant_id,
                    service = service_name,
                    url = %default.service_url,
                    "Resolved default service URL"
                );
                trace.resolved(default.service_url, None, true);
                record_resolution(service_name, "default");
                Ok(trace)
            }
            Ok(_) => {
                tracing::debug!(
                    tenant_id = tenant_id,
                    service = service_name,
                    "No configuration for service"
                );
                trace.failed(NOT_FOUND_MESSAGE);
                record_resolution(service_name, "not_found");
                Err(ResolveError::NotFound(Box::new(trace)))
            }
            Err(e) => {
                tracing::warn!(
                    tenant_id = tenant_id,
                    service = service_name,
                    error = %e,
                    "Default config lookup failed"
                );
                trace.failed(format!("failed to resolve service URL: {}", e));
                record_resolution(service_name, "not_found");
                Err(ResolveError::NotFound(Box::new(trace)))
            }
        }
    }

    /// Walk a config's active endpoints in priority order, skipping unhealthy ones.
    ///
    /// Every skipped URL is recorded in `attempted_urls`. When the walk is
    /// exhausted the config's `default_service_url` is used, and only when
    /// that is empty does the call fail with the partial trace attached.
    pub fn resolve_with_health(
        &self,
        config: &ServiceConfig,
    ) -> Result<FallbackChainResult, ResolveError> {
        let mut trace = FallbackChainResult::new(&config.tenant_id, &config.service_name);

        for endpoint in config.endpoints_by_priority() {
            if endpoint.url.is_empty() {
                continue;
            }

            if self
                .health
                .is_healthy(&config.tenant_id, &config.service_name, &endpoint.url)
            {
                tracing::debug!(
                    tenant_id = %config.tenant_id,
                    service = %config.service_name,
                    url = %endpoint.url,
                    skipped = trace.attempted_urls.len(),
                    "Resolved healthy endpoint"
                );
                trace.resolved(endpoint.url.clone(), Some(endpoint.clone()), false);
                record_resolution(&config.service_name, "tenant");
                return Ok(trace);
            }

            tracing::debug!(
                tenant_id = %config.tenant_id,
                service = %config.service_name,
                url = %endpoint.url,
                "Skipping unhealthy endpoint"
            );
            trace.attempted_urls.push(endpoint.url.clone());
        }

        if !config.default_service_url.is_empty() {
            trace.resolved(config.default_service_url.clone(), None, true);
            record_resolution(&config.service_name, "default");
            return Ok(trace);
        }

        tracing::warn!(
            tenant_id = %config.tenant_id,
            service = %config.service_name,
            attempted = ?trace.attempted_urls,
            "No healthy endpoint available"
        );
        trace.failed(UNAVAILABLE_MESSAGE);
        record_resolution(&config.service_name, "unavailable");
        Err(ResolveError::Unavailable(Box::new(trace)))
    }

    /// Forget the round-robin position for a service
    pub fn reset_cursor(&self, key: &ServiceKey) {
        self.cursors.reset(key);
    }

    /// Pick one URL from a config using its load-balancing strategy.
    ///
    /// Returns the URL and, when it came from an endpoint, that endpoint.
    fn select_endpoint(&self, config: &ServiceConfig) -> Option<(String, Option<Endpoint>)> {
        let candidates: Vec<&Endpoint> = config
            .active_endpoints()
            .into_iter()
            .filter(|e| !e.url.is_empty())
            .collect();

        if candidates.is_empty() {
            // Last-ditch: the primary even if disabled, then the config's own default
            if !config.primary_endpoint.url.is_empty() {
                let primary = config.primary_endpoint.clone();
                return Some((primary.url.clone(), Some(primary)));
            }
            if !config.default_service_url.is_empty() {
                return Some((config.default_service_url.clone(), None));
            }
            return None;
        }

        let index = match config.load_balance_strategy {
            LoadBalanceStrategy::RoundRobin | LoadBalanceStrategy::LeastConn => self
                .cursors
                .next_index(&config.key(), candidates.len()),
            LoadBalanceStrategy::Random => {
                selection::random_index(&mut rand::thread_rng(), candidates.len())
            }
            LoadBalanceStrategy::Weighted => {
                let weights: Vec<u32> = candidates.iter().map(|e| e.weight).collect();
                selection::weighted_index(&mut rand::thread_rng(), &weights)
            }
        };

        let chosen = candidates[index].clone();
        Some((chosen.url.clone(), Some(chosen)))
    }
}

fn record_resolution(service_name: &str, outcome: &'static str) {
    metrics::counter!("waypoint_resolutions_total",
        "service" => service_name.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}
