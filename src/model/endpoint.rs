use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One network target a service can be routed to.
///
/// `is_active` is an administrative switch. It says nothing about live
/// health, which is tracked separately by [`crate::health::HealthTracker`].
///
/// # Examples
///
/// ```
/// use waypoint::model::Endpoint;
///
/// let endpoint = Endpoint::new("http://billing-eu:8080")
///     .with_priority(1)
///     .with_weight(3);
/// assert!(endpoint.is_active);
/// assert_eq!(endpoint.priority, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    /// Base URL, e.g. `http://user-service:8080`
    pub url: String,
    /// Lower is tried first; 0 is conventionally the primary
    pub priority: i32,
    /// Relative share for weighted selection
    pub weight: u32,
    /// Request timeout callers should apply, in seconds
    pub timeout_seconds: u32,
    /// Extra headers callers should send
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    pub is_active: bool,
}

impl Endpoint {
    /// Create an active endpoint with priority 0 and no weight.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_timeout(mut self, timeout_seconds: u32) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Mark the endpoint administratively disabled.
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            url: String::new(),
            priority: 0,
            weight: 0,
            timeout_seconds: 0,
            headers: HashMap::new(),
            is_active: true,
        }
    }
}
