//! Endpoint health tracking.
//!
//! Keeps the in-memory table of reported endpoint outcomes that the resolver
//! consults on its health-aware path. Waypoint never probes endpoints itself:
//! whatever component performs the checks reports outcomes here.
//!
//! The table is process-local. Several Waypoint instances each keep their own
//! view, so health caching is best-effort rather than cluster-wide.

mod state;

#[cfg(test)]
mod tests;

pub use state::*;

use crate::model::{EndpointKey, DEFAULT_FAIL_THRESHOLD};
use dashmap::DashMap;

/// Concurrent table of endpoint health records.
///
/// Backed by a sharded map: lookups take a shard read lock and never block
/// each other, while a report or eviction holds the write lock of a single
/// shard for the duration of one key update.
///
/// # Examples
///
/// ```
/// use waypoint::health::HealthTracker;
///
/// let tracker = HealthTracker::new();
/// assert!(tracker.is_healthy("acme", "billing", "http://billing:8080"));
///
/// for _ in 0..3 {
///     tracker.report_outcome("acme", "billing", "http://billing:8080", false);
/// }
/// assert!(!tracker.is_healthy("acme", "billing", "http://billing:8080"));
/// ```
pub struct HealthTracker {
    statuses: DashMap<EndpointKey, ServiceStatus>,
    default_fail_threshold: u32,
}

impl HealthTracker {
    /// Create an empty tracker using the standard failure threshold.
    pub fn new() -> Self {
        Self::with_fail_threshold(DEFAULT_FAIL_THRESHOLD)
    }

    /// Create an empty tracker with a custom default failure threshold.
    ///
    /// A zero threshold is raised to 1.
    pub fn with_fail_threshold(fail_threshold: u32) -> Self {
        Self {
            statuses: DashMap::new(),
            default_fail_threshold: fail_threshold.max(1),
        }
    }

    pub fn default_fail_threshold(&self) -> u32 {
        self.default_fail_threshold
    }

    /// Record an externally observed outcome using the default threshold.
    ///
    /// Returns a copy of the updated record.
    pub fn report_outcome(
        &self,
        tenant_id: &str,
        service_name: &str,
        url: &str,
        healthy: bool,
    ) -> ServiceStatus {
        self.report_outcome_with_threshold(
            tenant_id,
            service_name,
            url,
            healthy,
            self.default_fail_threshold,
        )
    }

    /// Record an outcome against a service-specific failure threshold.
    pub fn report_outcome_with_threshold(
        &self,
        tenant_id: &str,
        service_name: &str,
        url: &str,
        healthy: bool,
        fail_threshold: u32,
    ) -> ServiceStatus {
        let key = EndpointKey::new(tenant_id, service_name, url);
        let unchecked = ServiceStatus::unchecked(&key);
        let mut status = self.statuses.entry(key).or_insert(unchecked);

        let transition = status.apply_outcome(healthy, fail_threshold.max(1), chrono::Utc::now());

        metrics::counter!("waypoint_health_reports_total",
            "healthy" => healthy.to_string()
        )
        .increment(1);

        if let Some(now_healthy) = transition {
            tracing::info!(
                tenant_id = tenant_id,
                service = service_name,
                url = url,
                healthy = now_healthy,
                consecutive_fails = status.consecutive_fails,
                "Endpoint health changed"
            );
            metrics::counter!("waypoint_health_transitions_total",
                "to" => if now_healthy { "healthy" } else { "unhealthy" }
            )
            .increment(1);
        } else {
            tracing::trace!(
                tenant_id = tenant_id,
                service = service_name,
                url = url,
                healthy = healthy,
                consecutive_fails = status.consecutive_fails,
                "Recorded health outcome"
            );
        }

        status.value().clone()
    }

    /// Whether an endpoint may be used. Endpoints never reported on are healthy.
    pub fn is_healthy(&self, tenant_id: &str, service_name: &str, url: &str) -> bool {
        let key = EndpointKey::new(tenant_id, service_name, url);
        self.statuses
            .get(&key)
            .map(|status| status.is_healthy)
            .unwrap_or(true)
    }

    /// Copy of an endpoint's record, or a synthesized unchecked one.
    pub fn get_status(&self, tenant_id: &str, service_name: &str, url: &str) -> ServiceStatus {
        let key = EndpointKey::new(tenant_id, service_name, url);
        match self.statuses.get(&key) {
            Some(status) => status.value().clone(),
            None => ServiceStatus::unchecked(&key),
        }
    }

    /// Copies of every record, in no particular order.
    pub fn get_all_statuses(&self) -> Vec<ServiceStatus> {
        self.statuses
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Drop one record so the endpoint reads as unchecked again.
    pub fn invalidate(&self, tenant_id: &str, service_name: &str, url: &str) {
        let key = EndpointKey::new(tenant_id, service_name, url);
        if self.statuses.remove(&key).is_some() {
            tracing::debug!(
                tenant_id = tenant_id,
                service = service_name,
                url = url,
                "Evicted endpoint health record"
            );
        }
    }

    /// Drop every record of one tenant service, whatever the URL.
    pub fn invalidate_service(&self, tenant_id: &str, service_name: &str) {
        let before = self.statuses.len();
        self.statuses
            .retain(|key, _| !(key.tenant_id == tenant_id && key.service_name == service_name));
        tracing::debug!(
            tenant_id = tenant_id,
            service = service_name,
            evicted = before.saturating_sub(self.statuses.len()),
            "Evicted service health records"
        );
    }

    /// Drop every record.
    pub fn invalidate_all(&self) {
        let evicted = self.statuses.len();
        self.statuses.clear();
        tracing::debug!(evicted, "Evicted all endpoint health records");
    }

    /// Number of endpoints with a recorded outcome.
    pub fn tracked_count(&self) -> usize {
        self.statuses.len()
    }
}

impl Default for HealthTracker {
    fn default() -> Self {
        Self::new()
    }
}
