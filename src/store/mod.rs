//! Configuration storage contract.
//!
//! The resolver and the registry facade only see the [`ConfigStore`] trait;
//! durable backends live outside this crate. [`MemoryStore`] is the
//! process-local implementation used by the binary and by tests.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use crate::model::{DefaultServiceConfig, ServiceConfig};
use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;

/// Read/write access to service configuration documents.
///
/// Upserts are idempotent by natural key (`tenant_id` + `service_name` for
/// tenant configs, `service_name` for defaults) and stamp `created_at` on
/// first insert and `updated_at` on every write.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// The tenant's config for a service, only if it is active.
    async fn find_active_config(
        &self,
        tenant_id: &str,
        service_name: &str,
    ) -> Result<Option<ServiceConfig>, StoreError>;

    /// The tenant's config for a service regardless of its active flag.
    async fn find_config(
        &self,
        tenant_id: &str,
        service_name: &str,
    ) -> Result<Option<ServiceConfig>, StoreError>;

    async fn find_default_config(
        &self,
        service_name: &str,
    ) -> Result<Option<DefaultServiceConfig>, StoreError>;

    /// Every config of a tenant, active or not.
    async fn list_tenant_configs(&self, tenant_id: &str) -> Result<Vec<ServiceConfig>, StoreError>;

    async fn list_default_configs(&self) -> Result<Vec<DefaultServiceConfig>, StoreError>;

    /// Insert or replace a tenant config. Returns the stored copy.
    async fn upsert_config(&self, config: ServiceConfig) -> Result<ServiceConfig, StoreError>;

    /// Insert or replace a default config. Returns the stored copy.
    async fn upsert_default_config(
        &self,
        config: DefaultServiceConfig,
    ) -> Result<DefaultServiceConfig, StoreError>;

    /// Remove a tenant config. Returns whether anything was removed.
    async fn delete_config(&self, tenant_id: &str, service_name: &str) -> Result<bool, StoreError>;
}

/// Bound a store call by a caller-supplied deadline.
pub async fn with_timeout<T, F>(timeout: Duration, operation: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_with_timeout_passes_result_through() {
        let value = with_timeout(Duration::from_secs(1), async { Ok::<_, StoreError>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_with_timeout_expires() {
        let result = with_timeout(Duration::from_millis(10), async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, StoreError>(())
        })
        .await;

        assert!(matches!(result, Err(StoreError::Timeout(_))));
    }
}
