//! Health-check policy attached to a service.

use serde::{Deserialize, Serialize};

pub const DEFAULT_HEALTH_CHECK_PATH: &str = "/health";
pub const DEFAULT_HEALTH_CHECK_METHOD: &str = "GET";
pub const DEFAULT_HEALTH_CHECK_INTERVAL_SECONDS: u64 = 30;
pub const DEFAULT_HEALTH_CHECK_TIMEOUT_SECONDS: u64 = 5;
pub const DEFAULT_FAIL_THRESHOLD: u32 = 3;

/// Describes how an external prober should check a service's endpoints.
///
/// Waypoint never executes this policy itself. It stores and exposes it, and
/// applies `fail_threshold` when consuming reported outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    pub enabled: bool,
    pub path: String,
    pub method: String,
    pub interval_seconds: u64,
    pub timeout_seconds: u64,
    /// Consecutive failures before an endpoint is marked unhealthy
    pub fail_threshold: u32,
}

impl HealthCheckConfig {
    /// Failure threshold, or `fallback` when this policy leaves it unset (zero).
    pub fn fail_threshold_or(&self, fallback: u32) -> u32 {
        if self.fail_threshold == 0 {
            fallback
        } else {
            self.fail_threshold
        }
    }
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_HEALTH_CHECK_PATH.to_string(),
            method: DEFAULT_HEALTH_CHECK_METHOD.to_string(),
            interval_seconds: DEFAULT_HEALTH_CHECK_INTERVAL_SECONDS,
            timeout_seconds: DEFAULT_HEALTH_CHECK_TIMEOUT_SECONDS,
            fail_threshold: DEFAULT_FAIL_THRESHOLD,
        }
    }
}
