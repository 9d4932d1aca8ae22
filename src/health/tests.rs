//! Unit tests for health module.

use super::*;
use std::sync::Arc;

const TENANT: &str = "acme";
const SERVICE: &str = "billing";
const URL: &str = "http://billing:8080";

fn fail_times(tracker: &HealthTracker, times: u32) {
    for _ in 0..times {
        tracker.report_outcome(TENANT, SERVICE, URL, false);
    }
}

// ============================================================================
// ServiceStatus state machine
// ============================================================================

#[test]
fn test_unchecked_status_is_healthy() {
    let key = crate::model::EndpointKey::new(TENANT, SERVICE, URL);
    let status = ServiceStatus::unchecked(&key);
    assert!(status.is_healthy);
    assert_eq!(status.consecutive_fails, 0);
    assert!(status.last_checked.is_none());
    assert!(status.last_error.is_none());
    assert_eq!(status.endpoint_url, URL);
}

#[test]
fn test_apply_failure_below_threshold_keeps_healthy() {
    let key = crate::model::EndpointKey::new(TENANT, SERVICE, URL);
    let mut status = ServiceStatus::unchecked(&key);
    let now = chrono::Utc::now();

    assert_eq!(status.apply_outcome(false, 3, now), None);
    assert_eq!(status.apply_outcome(false, 3, now), None);
    assert!(status.is_healthy);
    assert_eq!(status.consecutive_fails, 2);
    assert_eq!(status.last_failure, Some(now));
    assert_eq!(status.last_error.as_deref(), Some(FAILURE_MESSAGE));
}

#[test]
fn test_apply_failure_at_threshold_transitions() {
    let key = crate::model::EndpointKey::new(TENANT, SERVICE, URL);
    let mut status = ServiceStatus::unchecked(&key);
    let now = chrono::Utc::now();

    status.apply_outcome(false, 3, now);
    status.apply_outcome(false, 3, now);
    assert_eq!(status.apply_outcome(false, 3, now), Some(false));
    // Further failures are not new transitions
    assert_eq!(status.apply_outcome(false, 3, now), None);
    assert_eq!(status.consecutive_fails, 4);
}

#[test]
fn test_apply_success_always_stamps_checked() {
    let key = crate::model::EndpointKey::new(TENANT, SERVICE, URL);
    let mut status = ServiceStatus::unchecked(&key);
    let now = chrono::Utc::now();

    assert_eq!(status.apply_outcome(true, 3, now), None);
    assert_eq!(status.last_checked, Some(now));
    assert_eq!(status.last_successful, Some(now));
    assert!(status.last_failure.is_none());
}

// ============================================================================
// HealthTracker
// ============================================================================

#[test]
fn test_unknown_endpoint_is_healthy() {
    let tracker = HealthTracker::new();
    assert!(tracker.is_healthy(TENANT, SERVICE, URL));

    let status = tracker.get_status(TENANT, SERVICE, URL);
    assert!(status.is_healthy);
    assert_eq!(status.consecutive_fails, 0);
    assert_eq!(tracker.tracked_count(), 0);
}

#[test]
fn test_failures_below_threshold_never_flip() {
    let tracker = HealthTracker::new();
    fail_times(&tracker, 2);

    assert!(tracker.is_healthy(TENANT, SERVICE, URL));
    assert_eq!(tracker.get_status(TENANT, SERVICE, URL).consecutive_fails, 2);
}

#[test]
fn test_threshold_failure_flips_unhealthy() {
    let tracker = HealthTracker::new();
    fail_times(&tracker, 3);

    assert!(!tracker.is_healthy(TENANT, SERVICE, URL));
    let status = tracker.get_status(TENANT, SERVICE, URL);
    assert!(!status.is_healthy);
    assert!(status.last_failure.is_some());
    assert!(status.last_checked.is_some());
}

#[test]
fn test_first_report_failure_does_not_flip() {
    let tracker = HealthTracker::new();
    let status = tracker.report_outcome(TENANT, SERVICE, URL, false);

    assert!(status.is_healthy);
    assert_eq!(status.consecutive_fails, 1);
    assert_eq!(tracker.tracked_count(), 1);
}

#[test]
fn test_single_success_resets_after_failures() {
    let tracker = HealthTracker::new();
    fail_times(&tracker, 7);
    assert!(!tracker.is_healthy(TENANT, SERVICE, URL));

    let status = tracker.report_outcome(TENANT, SERVICE, URL, true);
    assert!(status.is_healthy);
    assert_eq!(status.consecutive_fails, 0);
    assert!(status.last_successful.is_some());
    assert!(tracker.is_healthy(TENANT, SERVICE, URL));
}

#[test]
fn test_custom_threshold() {
    let tracker = HealthTracker::with_fail_threshold(5);
    fail_times(&tracker, 4);
    assert!(tracker.is_healthy(TENANT, SERVICE, URL));
    fail_times(&tracker, 1);
    assert!(!tracker.is_healthy(TENANT, SERVICE, URL));
}

#[test]
fn test_zero_threshold_raised_to_one() {
    let tracker = HealthTracker::with_fail_threshold(0);
    assert_eq!(tracker.default_fail_threshold(), 1);
    fail_times(&tracker, 1);
    assert!(!tracker.is_healthy(TENANT, SERVICE, URL));
}

#[test]
fn test_per_report_threshold_overrides_default() {
    let tracker = HealthTracker::new();
    tracker.report_outcome_with_threshold(TENANT, SERVICE, URL, false, 1);
    assert!(!tracker.is_healthy(TENANT, SERVICE, URL));
}

#[test]
fn test_keys_are_isolated_by_tenant_and_service() {
    let tracker = HealthTracker::new();
    fail_times(&tracker, 3);

    assert!(tracker.is_healthy("other-tenant", SERVICE, URL));
    assert!(tracker.is_healthy(TENANT, "other-service", URL));
    assert!(!tracker.is_healthy(TENANT, SERVICE, URL));
}

#[test]
fn test_get_status_returns_copy() {
    let tracker = HealthTracker::new();
    fail_times(&tracker, 1);

    let mut copy = tracker.get_status(TENANT, SERVICE, URL);
    copy.consecutive_fails = 99;
    copy.is_healthy = false;

    let fresh = tracker.get_status(TENANT, SERVICE, URL);
    assert_eq!(fresh.consecutive_fails, 1);
    assert!(fresh.is_healthy);
}

#[test]
fn test_get_all_statuses() {
    let tracker = HealthTracker::new();
    tracker.report_outcome(TENANT, SERVICE, "http://a", true);
    tracker.report_outcome(TENANT, SERVICE, "http://b", false);

    let mut urls: Vec<_> = tracker
        .get_all_statuses()
        .into_iter()
        .map(|s| s.endpoint_url)
        .collect();
    urls.sort();
    assert_eq!(urls, vec!["http://a", "http://b"]);
}

#[test]
fn test_invalidate_resets_to_optimistic_default() {
    let tracker = HealthTracker::new();
    fail_times(&tracker, 3);
    tracker.report_outcome(TENANT, SERVICE, "http://other", false);

    tracker.invalidate(TENANT, SERVICE, URL);

    assert!(tracker.is_healthy(TENANT, SERVICE, URL));
    assert_eq!(tracker.get_status(TENANT, SERVICE, URL).consecutive_fails, 0);
    assert_eq!(tracker.tracked_count(), 1);
}

#[test]
fn test_invalidate_unknown_key_is_noop() {
    let tracker = HealthTracker::new();
    tracker.invalidate(TENANT, SERVICE, URL);
    assert_eq!(tracker.tracked_count(), 0);
}

#[test]
fn test_invalidate_service_keeps_other_services() {
    let tracker = HealthTracker::new();
    tracker.report_outcome(TENANT, SERVICE, "http://a", false);
    tracker.report_outcome(TENANT, SERVICE, "http://b", true);
    tracker.report_outcome(TENANT, "auth", "http://a", true);
    tracker.report_outcome("globex", SERVICE, "http://a", true);

    tracker.invalidate_service(TENANT, SERVICE);

    assert_eq!(tracker.tracked_count(), 2);
    assert!(tracker
        .get_all_statuses()
        .iter()
        .all(|s| !(s.tenant_id == TENANT && s.service_name == SERVICE)));
}

#[test]
fn test_invalidate_all() {
    let tracker = HealthTracker::new();
    fail_times(&tracker, 3);
    tracker.report_outcome(TENANT, SERVICE, "http://other", true);

    tracker.invalidate_all();

    assert_eq!(tracker.tracked_count(), 0);
    assert!(tracker.get_all_statuses().is_empty());
    assert!(tracker.is_healthy(TENANT, SERVICE, URL));
}

#[test]
fn test_concurrent_reports_count_every_failure() {
    let tracker = Arc::new(HealthTracker::with_fail_threshold(1000));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    tracker.report_outcome(TENANT, SERVICE, URL, false);
                    let _ = tracker.is_healthy(TENANT, SERVICE, URL);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let status = tracker.get_status(TENANT, SERVICE, URL);
    assert_eq!(status.consecutive_fails, 400);
    assert!(status.is_healthy);
}
