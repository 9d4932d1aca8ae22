//! Service Registry module.
//!
//! The facade the transport and the CLI talk to. It owns the configuration
//! store, the resolver and the health tracker, and exposes the wire-facing
//! operations: config CRUD, resolution, and per-endpoint health.

mod error;

pub use error::*;

use crate::health::{HealthTracker, ServiceStatus};
use crate::model::{DefaultServiceConfig, ServiceConfig, ServiceKey};
use crate::routing::{FallbackChainResult, Resolver};
use crate::store::{self, ConfigStore, MemoryStore};
use std::sync::Arc;
use std::time::Duration;

/// The Service Registry ties config storage, resolution and health together.
///
/// Constructed once at startup and shared behind an `Arc`.
///
/// # Examples
///
/// ```
/// use waypoint::model::{Endpoint, ServiceConfig};
/// use waypoint::registry::ServiceRegistry;
///
/// # #[tokio::main]
/// # async fn main() {
/// let registry = ServiceRegistry::in_memory();
/// registry
///     .upsert_service_config(ServiceConfig::new("acme", "billing", Endpoint::new("http://a")))
///     .await
///     .unwrap();
///
/// let trace = registry.resolve("acme", "billing").await.unwrap();
/// assert_eq!(trace.resolved_url, "http://a");
/// # }
/// ```
pub struct ServiceRegistry {
    store: Arc<dyn ConfigStore>,
    health: Arc<HealthTracker>,
    resolver: Resolver,
}

impl ServiceRegistry {
    /// Create a registry over an existing store and health tracker.
    pub fn new(store: Arc<dyn ConfigStore>, health: Arc<HealthTracker>) -> Self {
        let resolver = Resolver::new(Arc::clone(&store), Arc::clone(&health));
        Self {
            store,
            health,
            resolver,
        }
    }

    /// Create a registry backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), Arc::new(HealthTracker::new()))
    }

    /// Bound every store call made by the registry and its resolver.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.resolver = self.resolver.with_store_timeout(store_timeout);
        self
    }

    pub fn health(&self) -> &Arc<HealthTracker> {
        &self.health
    }

    fn store_timeout(&self) -> Duration {
        self.resolver.store_timeout()
    }

    // ------------------------------------------------------------------
    // Tenant configs
    // ------------------------------------------------------------------

    /// Validate and store a tenant config. Returns the stored copy.
    pub async fn upsert_service_config(
        &self,
        config: ServiceConfig,
    ) -> Result<ServiceConfig, RegistryError> {
        config.validate()?;
        let stored =
            store::with_timeout(self.store_timeout(), self.store.upsert_config(config)).await?;

        tracing::info!(
            tenant_id = %stored.tenant_id,
            service = %stored.service_name,
            endpoints = stored.fallback_chain.len() + 1,
            strategy = %stored.load_balance_strategy,
            "Service config stored"
        );
        Ok(stored)
    }

    /// Fetch a tenant config regardless of its active flag.
    pub async fn get_service_config(
        &self,
        tenant_id: &str,
        service_name: &str,
    ) -> Result<ServiceConfig, RegistryError> {
        store::with_timeout(
            self.store_timeout(),
            self.store.find_config(tenant_id, service_name),
        )
        .await?
        .ok_or_else(|| RegistryError::config_not_found(tenant_id, service_name))
    }

    /// Every config of a tenant, sorted by service name.
    pub async fn list_tenant_services(
        &self,
        tenant_id: &str,
    ) -> Result<Vec<ServiceConfig>, RegistryError> {
        let configs = store::with_timeout(
            self.store_timeout(),
            self.store.list_tenant_configs(tenant_id),
        )
        .await?;
        Ok(configs)
    }

    pub async fn delete_service_config(
        &self,
        tenant_id: &str,
        service_name: &str,
    ) -> Result<(), RegistryError> {
        let removed = store::with_timeout(
            self.store_timeout(),
            self.store.delete_config(tenant_id, service_name),
        )
        .await?;

        if !removed {
            return Err(RegistryError::config_not_found(tenant_id, service_name));
        }

        self.resolver
            .reset_cursor(&ServiceKey::new(tenant_id, service_name));
        self.health.invalidate_service(tenant_id, service_name);
        tracing::info!(
            tenant_id = tenant_id,
            service = service_name,
            "Service config deleted"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Default configs
    // ------------------------------------------------------------------

    pub async fn upsert_default_config(
        &self,
        config: DefaultServiceConfig,
    ) -> Result<DefaultServiceConfig, RegistryError> {
        config.validate()?;
        let stored = store::with_timeout(
            self.store_timeout(),
            self.store.upsert_default_config(config),
        )
        .await?;

        tracing::info!(
            service = %stored.service_name,
            url = %stored.service_url,
            "Default service config stored"
        );
        Ok(stored)
    }

    pub async fn get_default_config(
        &self,
        service_name: &str,
    ) -> Result<DefaultServiceConfig, RegistryError> {
        store::with_timeout(
            self.store_timeout(),
            self.store.find_default_config(service_name),
        )
        .await?
        .ok_or_else(|| RegistryError::DefaultNotFound(service_name.to_string()))
    }

    pub async fn list_default_configs(&self) -> Result<Vec<DefaultServiceConfig>, RegistryError> {
        let defaults =
            store::with_timeout(self.store_timeout(), self.store.list_default_configs()).await?;
        Ok(defaults)
    }

    // ------------------------------------------------------------------
    // Resolution
    // ------------------------------------------------------------------

    pub async fn resolve(
        &self,
        tenant_id: &str,
        service_name: &str,
    ) -> Result<FallbackChainResult, RegistryError> {
        Ok(self.resolver.resolve(tenant_id, service_name).await?)
    }

    /// Resolve with a caller-supplied deadline on the store lookups.
    pub async fn resolve_with_deadline(
        &self,
        tenant_id: &str,
        service_name: &str,
        deadline: Duration,
    ) -> Result<FallbackChainResult, RegistryError> {
        Ok(self
            .resolver
            .resolve_within(tenant_id, service_name, deadline)
            .await?)
    }

    /// Health-aware resolution over the tenant's active config.
    pub async fn resolve_with_health(
        &self,
        tenant_id: &str,
        service_name: &str,
    ) -> Result<FallbackChainResult, RegistryError> {
        let config = store::with_timeout(
            self.store_timeout(),
            self.store.find_active_config(tenant_id, service_name),
        )
        .await?
        .ok_or_else(|| RegistryError::config_not_found(tenant_id, service_name))?;

        Ok(self.resolver.resolve_with_health(&config)?)
    }

    // ------------------------------------------------------------------
    // Health
    // ------------------------------------------------------------------

    /// Health of every endpoint of a config, primary first, in stored order.
    pub async fn endpoint_health(
        &self,
        tenant_id: &str,
        service_name: &str,
    ) -> Result<Vec<ServiceStatus>, RegistryError> {
        let config = self.get_service_config(tenant_id, service_name).await?;
        Ok(config
            .all_endpoints()
            .filter(|e| !e.url.is_empty())
            .map(|e| self.health.get_status(tenant_id, service_name, &e.url))
            .collect())
    }

    /// Record an externally observed outcome for one endpoint.
    ///
    /// The stored config's fail threshold applies when there is one. A store
    /// failure only costs the custom threshold, never the report.
    pub async fn report_outcome(
        &self,
        tenant_id: &str,
        service_name: &str,
        url: &str,
        healthy: bool,
    ) -> ServiceStatus {
        let lookup = store::with_timeout(
            self.store_timeout(),
            self.store.find_config(tenant_id, service_name),
        )
        .await;

        let fail_threshold = match lookup {
            Ok(Some(config)) => config
                .health_check
                .fail_threshold_or(self.health.default_fail_threshold()),
            Ok(None) => self.health.default_fail_threshold(),
            Err(e) => {
                tracing::warn!(
                    tenant_id = tenant_id,
                    service = service_name,
                    error = %e,
                    "Config lookup failed, using default fail threshold"
                );
                self.health.default_fail_threshold()
            }
        };

        self.health.report_outcome_with_threshold(
            tenant_id,
            service_name,
            url,
            healthy,
            fail_threshold,
        )
    }

    pub fn invalidate(&self, tenant_id: &str, service_name: &str, url: &str) {
        self.health.invalidate(tenant_id, service_name, url);
    }

    pub fn invalidate_all(&self) {
        self.health.invalidate_all();
    }

    pub fn all_statuses(&self) -> Vec<ServiceStatus> {
        self.health.get_all_statuses()
    }
}
