//! # Metrics Collection Module
//!
//! Prometheus export and a JSON stats API over the registry.
//!
//! ## Overview
//!
//! This module exposes two endpoints:
//! - `GET /metrics` - Prometheus text format metrics
//! - `GET /v1/stats` - JSON format statistics
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `waypoint_resolutions_total{service, outcome}` - Resolutions by outcome
//!   (`tenant`, `default`, `not_found`, `unavailable`)
//! - `waypoint_health_reports_total{healthy}` - Reported health outcomes
//! - `waypoint_health_transitions_total{to}` - Healthy/unhealthy flips
//!
//! **Histograms:**
//! - `waypoint_resolution_duration_seconds{service}` - Resolve request latency
//!
//! **Gauges:**
//! - `waypoint_endpoints_tracked` - Endpoints in the health table
//! - `waypoint_endpoints_unhealthy` - Endpoints past their failure threshold
//!
//! Recording without an installed recorder is a no-op, so library and test
//! use never needs [`setup_metrics`].

pub mod handler;
pub mod types;

pub use types::*;

// Re-export PrometheusBuilder for test compatibility
pub use metrics_exporter_prometheus::PrometheusBuilder;

use crate::health::ServiceStatus;
use crate::registry::ServiceRegistry;
use std::sync::Arc;
use std::time::Instant;

/// Central coordinator for metrics collection and gauge computation.
pub struct MetricsCollector {
    registry: Arc<ServiceRegistry>,
    start_time: Instant,
    prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(
        registry: Arc<ServiceRegistry>,
        start_time: Instant,
        prometheus_handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> Self {
        Self {
            registry,
            start_time,
            prometheus_handle,
        }
    }

    /// Summarise the health table and publish the endpoint gauges.
    pub fn update_health_gauges(&self) -> EndpointStats {
        self.publish_health_gauges(&self.registry.all_statuses())
    }

    /// Publish the endpoint gauges from an existing snapshot of the table.
    pub fn publish_health_gauges(&self, statuses: &[ServiceStatus]) -> EndpointStats {
        let stats = handler::compute_endpoint_stats(statuses);

        metrics::gauge!("waypoint_endpoints_tracked").set(stats.tracked as f64);
        metrics::gauge!("waypoint_endpoints_unhealthy").set(stats.unhealthy as f64);

        stats
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Initialize the Prometheus exporter and install it as the global recorder.
///
/// Resolution latency buckets are in seconds and sized for in-memory lookups
/// with an occasional slow store call.
pub fn setup_metrics(
) -> Result<metrics_exporter_prometheus::PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let duration_buckets = &[
        0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("waypoint_resolution_duration_seconds".to_string()),
            duration_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}

/// Handle for a recorder that is not installed globally.
///
/// Used when another recorder already owns the global slot (tests, or a
/// second router in one process).
pub fn detached_handle() -> metrics_exporter_prometheus::PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector_uptime() {
        let registry = Arc::new(ServiceRegistry::in_memory());
        let collector = MetricsCollector::new(registry, Instant::now(), detached_handle());

        assert!(collector.uptime_seconds() < 1);
    }

    #[tokio::test]
    async fn test_update_health_gauges_counts_table() {
        let registry = Arc::new(ServiceRegistry::in_memory());
        registry.report_outcome("acme", "billing", "http://a", true).await;
        for _ in 0..3 {
            registry
                .report_outcome("acme", "billing", "http://b", false)
                .await;
        }

        let collector = MetricsCollector::new(registry, Instant::now(), detached_handle());
        let stats = collector.update_health_gauges();

        assert_eq!(
            stats,
            EndpointStats {
                tracked: 2,
                healthy: 1,
                unhealthy: 1,
            }
        );
    }
}
