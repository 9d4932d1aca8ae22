use super::{Endpoint, HealthCheckConfig, ServiceKey, ValidationError};
use crate::routing::LoadBalanceStrategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Routing policy for one logical service of one tenant.
///
/// # Examples
///
/// ```
/// use waypoint::model::{Endpoint, ServiceConfig};
///
/// let config = ServiceConfig::new("acme", "billing", Endpoint::new("http://billing:8080"))
///     .with_fallback(Endpoint::new("http://billing-dr:8080").with_priority(1))
///     .with_default_url("http://billing.shared:8080");
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.active_endpoints().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub tenant_id: String,
    /// Logical service name, e.g. "user", "auth", "notification"
    pub service_name: String,
    pub primary_endpoint: Endpoint,
    /// Tried in order when the primary is not usable
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallback_chain: Vec<Endpoint>,
    /// Last resort when no endpoint in the chain is viable
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_service_url: String,
    pub health_check: HealthCheckConfig,
    pub load_balance_strategy: LoadBalanceStrategy,
    /// Config-level kill switch
    pub is_active: bool,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, String>,
    /// Stamped by the store on first insert
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Stamped by the store on every write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ServiceConfig {
    pub fn new(
        tenant_id: impl Into<String>,
        service_name: impl Into<String>,
        primary_endpoint: Endpoint,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            service_name: service_name.into(),
            primary_endpoint,
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, endpoint: Endpoint) -> Self {
        self.fallback_chain.push(endpoint);
        self
    }

    pub fn with_default_url(mut self, url: impl Into<String>) -> Self {
        self.default_service_url = url.into();
        self
    }

    pub fn with_strategy(mut self, strategy: LoadBalanceStrategy) -> Self {
        self.load_balance_strategy = strategy;
        self
    }

    pub fn with_health_check(mut self, health_check: HealthCheckConfig) -> Self {
        self.health_check = health_check;
        self
    }

    pub fn key(&self) -> ServiceKey {
        ServiceKey::new(self.tenant_id.clone(), self.service_name.clone())
    }

    /// Check the invariants required before the config may be stored.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.tenant_id.is_empty() {
            return Err(ValidationError::TenantIdRequired);
        }
        if self.service_name.is_empty() {
            return Err(ValidationError::ServiceNameRequired);
        }
        if self.primary_endpoint.url.is_empty() {
            return Err(ValidationError::PrimaryEndpointRequired);
        }
        Ok(())
    }

    /// Primary followed by the fallback chain, in stored order, regardless of activity.
    pub fn all_endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        std::iter::once(&self.primary_endpoint).chain(self.fallback_chain.iter())
    }

    /// Administratively enabled endpoints, primary first.
    pub fn active_endpoints(&self) -> Vec<&Endpoint> {
        self.all_endpoints().filter(|e| e.is_active).collect()
    }

    /// Active endpoints ordered by ascending priority.
    ///
    /// The sort is stable: endpoints sharing a priority keep their declared order.
    pub fn endpoints_by_priority(&self) -> Vec<&Endpoint> {
        let mut endpoints = self.active_endpoints();
        endpoints.sort_by_key(|e| e.priority);
        endpoints
    }

    /// Health-check interval in seconds, defaulting when unset.
    pub fn health_check_interval(&self) -> u64 {
        if self.health_check.interval_seconds == 0 {
            super::DEFAULT_HEALTH_CHECK_INTERVAL_SECONDS
        } else {
            self.health_check.interval_seconds
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            tenant_id: String::new(),
            service_name: String::new(),
            primary_endpoint: Endpoint::default(),
            fallback_chain: Vec::new(),
            default_service_url: String::new(),
            health_check: HealthCheckConfig::default(),
            load_balance_strategy: LoadBalanceStrategy::default(),
            is_active: true,
            metadata: HashMap::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// System-wide fallback for a service, used when a tenant has no usable override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultServiceConfig {
    pub service_name: String,
    pub service_url: String,
    pub health_check: HealthCheckConfig,
    pub fallback_to_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DefaultServiceConfig {
    pub fn new(service_name: impl Into<String>, service_url: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            service_url: service_url.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.service_name.is_empty() {
            return Err(ValidationError::ServiceNameRequired);
        }
        if self.service_url.is_empty() {
            return Err(ValidationError::ServiceUrlRequired);
        }
        Ok(())
    }
}

impl Default for DefaultServiceConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            service_url: String::new(),
            health_check: HealthCheckConfig::default(),
            fallback_to_default: true,
            created_at: None,
            updated_at: None,
        }
    }
}
