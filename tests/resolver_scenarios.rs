//! End-to-end resolution scenarios over the public resolver API.

use std::collections::HashSet;
use std::sync::Arc;
use waypoint::health::HealthTracker;
use waypoint::model::{DefaultServiceConfig, Endpoint, ServiceConfig};
use waypoint::routing::{LoadBalanceStrategy, ResolveError, Resolver};
use waypoint::store::{ConfigStore, MemoryStore};

fn setup() -> (Arc<MemoryStore>, Arc<HealthTracker>, Resolver) {
    let store = Arc::new(MemoryStore::new());
    let health = Arc::new(HealthTracker::new());
    let resolver = Resolver::new(store.clone(), health.clone());
    (store, health, resolver)
}

fn fail_times(health: &HealthTracker, url: &str, times: u32) {
    for _ in 0..times {
        health.report_outcome("acme", "billing", url, false);
    }
}

// ============================================================================
// Health-aware walk
// ============================================================================

#[test]
fn test_inactive_primary_resolves_to_active_fallback() {
    let (_, _, resolver) = setup();
    let config = ServiceConfig::new("acme", "billing", Endpoint::new("http://a").inactive())
        .with_fallback(Endpoint::new("http://b").with_priority(1))
        .with_default_url("http://d");

    let trace = resolver.resolve_with_health(&config).unwrap();

    assert_eq!(trace.resolved_url, "http://b");
    assert!(!trace.is_default);
    assert!(trace.attempted_urls.is_empty());
}

#[test]
fn test_unhealthy_fallback_falls_through_to_default() {
    let (_, health, resolver) = setup();
    let config = ServiceConfig::new("acme", "billing", Endpoint::new("http://a").inactive())
        .with_fallback(Endpoint::new("http://b").with_priority(1))
        .with_default_url("http://d");
    fail_times(&health, "http://b", 3);

    let trace = resolver.resolve_with_health(&config).unwrap();

    assert_eq!(trace.resolved_url, "http://d");
    assert!(trace.is_default);
    assert_eq!(trace.attempted_urls, vec!["http://b"]);
}

#[test]
fn test_single_endpoint_chain_follows_primary_health() {
    let (_, health, resolver) = setup();
    let config = ServiceConfig::new("acme", "billing", Endpoint::new("http://a"))
        .with_default_url("http://d");

    assert_eq!(
        resolver.resolve_with_health(&config).unwrap().resolved_url,
        "http://a"
    );

    fail_times(&health, "http://a", 2);
    assert_eq!(
        resolver.resolve_with_health(&config).unwrap().resolved_url,
        "http://a"
    );

    fail_times(&health, "http://a", 1);
    assert_eq!(
        resolver.resolve_with_health(&config).unwrap().resolved_url,
        "http://d"
    );

    health.report_outcome("acme", "billing", "http://a", true);
    assert_eq!(
        resolver.resolve_with_health(&config).unwrap().resolved_url,
        "http://a"
    );
}

#[test]
fn test_exhausted_chain_without_default_keeps_trace() {
    let (_, health, resolver) = setup();
    let config = ServiceConfig::new("acme", "billing", Endpoint::new("http://a"))
        .with_fallback(Endpoint::new("http://b").with_priority(1));
    fail_times(&health, "http://a", 3);
    fail_times(&health, "http://b", 3);

    let err = resolver.resolve_with_health(&config).unwrap_err();

    assert!(matches!(err, ResolveError::Unavailable(_)));
    let trace = err.trace();
    assert!(!trace.success);
    assert_eq!(trace.attempted_urls, vec!["http://a", "http://b"]);
    assert!(trace.error.is_some());
}

// ============================================================================
// Load-balanced resolution
// ============================================================================

#[tokio::test]
async fn test_round_robin_visits_each_candidate_once_per_cycle() {
    let (store, _, resolver) = setup();
    store
        .upsert_config(
            ServiceConfig::new("acme", "billing", Endpoint::new("http://a"))
                .with_fallback(Endpoint::new("http://b"))
                .with_fallback(Endpoint::new("http://c")),
        )
        .await
        .unwrap();

    for _ in 0..4 {
        let mut seen = HashSet::new();
        for _ in 0..3 {
            let trace = resolver.resolve("acme", "billing").await.unwrap();
            seen.insert(trace.resolved_url);
        }
        assert_eq!(seen.len(), 3);
    }
}

#[tokio::test]
async fn test_unknown_strategy_matches_round_robin() {
    let (store, _, resolver) = setup();
    let config: ServiceConfig = serde_json::from_value(serde_json::json!({
        "tenant_id": "acme",
        "service_name": "billing",
        "primary_endpoint": {"url": "http://a"},
        "fallback_chain": [{"url": "http://b"}],
        "load_balance_strategy": "bogus"
    }))
    .unwrap();
    assert_eq!(config.load_balance_strategy, LoadBalanceStrategy::RoundRobin);
    store.upsert_config(config).await.unwrap();

    let mut order = Vec::new();
    for _ in 0..4 {
        order.push(resolver.resolve("acme", "billing").await.unwrap().resolved_url);
    }
    assert_eq!(order, vec!["http://a", "http://b", "http://a", "http://b"]);
}

#[tokio::test]
async fn test_zero_weights_always_return_a_candidate() {
    let (store, _, resolver) = setup();
    store
        .upsert_config(
            ServiceConfig::new("acme", "billing", Endpoint::new("http://a"))
                .with_fallback(Endpoint::new("http://b"))
                .with_fallback(Endpoint::new("http://c"))
                .with_strategy(LoadBalanceStrategy::Weighted),
        )
        .await
        .unwrap();

    let candidates = ["http://a", "http://b", "http://c"];
    for _ in 0..50 {
        let trace = resolver.resolve("acme", "billing").await.unwrap();
        assert!(candidates.contains(&trace.resolved_url.as_str()));
    }
}

#[tokio::test]
async fn test_inactive_tenant_config_uses_system_default() {
    let (store, _, resolver) = setup();
    let mut config = ServiceConfig::new("acme", "billing", Endpoint::new("http://a"));
    config.is_active = false;
    store.upsert_config(config).await.unwrap();
    store
        .upsert_default_config(DefaultServiceConfig::new("billing", "http://shared"))
        .await
        .unwrap();

    let trace = resolver.resolve("acme", "billing").await.unwrap();

    assert_eq!(trace.resolved_url, "http://shared");
    assert!(trace.is_default);
}

#[tokio::test]
async fn test_nothing_configured_is_not_found() {
    let (_, _, resolver) = setup();

    let err = resolver.resolve("acme", "billing").await.unwrap_err();

    assert!(matches!(err, ResolveError::NotFound(_)));
    assert_eq!(
        err.trace().error.as_deref(),
        Some("no configuration found for service")
    );
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolution_and_reports() {
    let (store, health, resolver) = setup();
    store
        .upsert_config(
            ServiceConfig::new("acme", "billing", Endpoint::new("http://a"))
                .with_fallback(Endpoint::new("http://b")),
        )
        .await
        .unwrap();
    let resolver = Arc::new(resolver);

    let mut handles = Vec::new();
    for i in 0..8 {
        let resolver = resolver.clone();
        let health = health.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..100 {
                let trace = resolver.resolve("acme", "billing").await.unwrap();
                assert!(trace.success);
                health.report_outcome("acme", "billing", &trace.resolved_url, i % 2 == 0);
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(health.tracked_count(), 2);
}
