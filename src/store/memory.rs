use super::{ConfigStore, StoreError};
use crate::model::{DefaultServiceConfig, ServiceConfig, ServiceKey};
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

/// In-process configuration store.
///
/// # Examples
///
/// ```
/// use waypoint::model::{Endpoint, ServiceConfig};
/// use waypoint::store::{ConfigStore, MemoryStore};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let stored = store
///     .upsert_config(ServiceConfig::new("acme", "billing", Endpoint::new("http://a")))
///     .await
///     .unwrap();
/// assert!(stored.created_at.is_some());
/// # }
/// ```
#[derive(Default)]
pub struct MemoryStore {
    configs: DashMap<ServiceKey, ServiceConfig>,
    defaults: DashMap<String, DefaultServiceConfig>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tenant configs held.
    pub fn config_count(&self) -> usize {
        self.configs.len()
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn find_active_config(
        &self,
        tenant_id: &str,
        service_name: &str,
    ) -> Result<Option<ServiceConfig>, StoreError> {
        let key = ServiceKey::new(tenant_id, service_name);
        Ok(self
            .configs
            .get(&key)
            .filter(|config| config.is_active)
            .map(|config| config.value().clone()))
    }

    async fn find_config(
        &self,
        tenant_id: &str,
        service_name: &str,
    ) -> Result<Option<ServiceConfig>, StoreError> {
        let key = ServiceKey::new(tenant_id, service_name);
        Ok(self.configs.get(&key).map(|config| config.value().clone()))
    }

    async fn find_default_config(
        &self,
        service_name: &str,
    ) -> Result<Option<DefaultServiceConfig>, StoreError> {
        Ok(self
            .defaults
            .get(service_name)
            .map(|config| config.value().clone()))
    }

    async fn list_tenant_configs(&self, tenant_id: &str) -> Result<Vec<ServiceConfig>, StoreError> {
        let mut configs: Vec<ServiceConfig> = self
            .configs
            .iter()
            .filter(|entry| entry.key().tenant_id == tenant_id)
            .map(|entry| entry.value().clone())
            .collect();
        configs.sort_by(|a, b| a.service_name.cmp(&b.service_name));
        Ok(configs)
    }

    async fn list_default_configs(&self) -> Result<Vec<DefaultServiceConfig>, StoreError> {
        let mut defaults: Vec<DefaultServiceConfig> = self
            .defaults
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        defaults.sort_by(|a, b| a.service_name.cmp(&b.service_name));
        Ok(defaults)
    }

    async fn upsert_config(&self, mut config: ServiceConfig) -> Result<ServiceConfig, StoreError> {
        config.validate()?;

        let now = Utc::now();
        let key = config.key();
        let created_at = self
            .configs
            .get(&key)
            .and_then(|existing| existing.created_at)
            .unwrap_or(now);

        config.created_at = Some(created_at);
        config.updated_at = Some(now);
        self.configs.insert(key, config.clone());
        Ok(config)
    }

    async fn upsert_default_config(
        &self,
        mut config: DefaultServiceConfig,
    ) -> Result<DefaultServiceConfig, StoreError> {
        config.validate()?;

        let now = Utc::now();
        let created_at = self
            .defaults
            .get(&config.service_name)
            .and_then(|existing| existing.created_at)
            .unwrap_or(now);

        config.created_at = Some(created_at);
        config.updated_at = Some(now);
        self.defaults
            .insert(config.service_name.clone(), config.clone());
        Ok(config)
    }

    async fn delete_config(&self, tenant_id: &str, service_name: &str) -> Result<bool, StoreError> {
        let key = ServiceKey::new(tenant_id, service_name);
        Ok(self.configs.remove(&key).is_some())
    }
}
