//! Registry tuning

use crate::model::DEFAULT_FAIL_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the registry, resolver and health tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// Consecutive failures before an endpoint is marked unhealthy, when the
    /// service's own health-check policy does not say otherwise
    pub default_fail_threshold: u32,
    /// Bound on each config store call
    pub store_timeout_ms: u64,
}

impl RegistrySettings {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            default_fail_threshold: DEFAULT_FAIL_THRESHOLD,
            store_timeout_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_settings_defaults() {
        let settings = RegistrySettings::default();
        assert_eq!(settings.default_fail_threshold, 3);
        assert_eq!(settings.store_timeout(), Duration::from_secs(2));
    }
}
