//! Per-endpoint health record.

use crate::model::EndpointKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message recorded on every reported failure.
pub const FAILURE_MESSAGE: &str = "health check failed";

/// Live health of one endpoint of one tenant service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub tenant_id: String,
    pub service_name: String,
    pub endpoint_url: String,
    pub is_healthy: bool,
    /// When any outcome was last reported
    pub last_checked: Option<DateTime<Utc>>,
    /// When a success was last reported
    pub last_successful: Option<DateTime<Utc>>,
    /// When a failure was last reported
    pub last_failure: Option<DateTime<Utc>>,
    /// Count of failures since the last success
    pub consecutive_fails: u32,
    pub last_error: Option<String>,
}

impl ServiceStatus {
    /// A healthy record that has never been checked.
    ///
    /// Endpoints without a record are assumed usable, so this is both the
    /// starting point for new records and what readers get for unknown keys.
    pub fn unchecked(key: &EndpointKey) -> Self {
        Self {
            tenant_id: key.tenant_id.clone(),
            service_name: key.service_name.clone(),
            endpoint_url: key.url.clone(),
            is_healthy: true,
            last_checked: None,
            last_successful: None,
            last_failure: None,
            consecutive_fails: 0,
            last_error: None,
        }
    }

    /// Apply one reported outcome.
    ///
    /// A failure only flips the endpoint to unhealthy once `consecutive_fails`
    /// reaches `fail_threshold`; a single success restores it immediately.
    /// Returns `Some(new_health)` when `is_healthy` changed.
    pub fn apply_outcome(
        &mut self,
        healthy: bool,
        fail_threshold: u32,
        now: DateTime<Utc>,
    ) -> Option<bool> {
        let was_healthy = self.is_healthy;
        self.last_checked = Some(now);

        if healthy {
            self.is_healthy = true;
            self.consecutive_fails = 0;
            self.last_successful = Some(now);
        } else {
            self.consecutive_fails = self.consecutive_fails.saturating_add(1);
            self.last_failure = Some(now);
            self.last_error = Some(FAILURE_MESSAGE.to_string());

            if self.consecutive_fails >= fail_threshold {
                self.is_healthy = false;
            }
        }

        (self.is_healthy != was_healthy).then_some(self.is_healthy)
    }
}
