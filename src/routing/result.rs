use crate::model::Endpoint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trace of one resolution attempt.
///
/// Returned on success and carried inside [`super::ResolveError`] on
/// failure, so callers can always see which URLs were passed over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackChainResult {
    pub tenant_id: String,
    pub service_name: String,
    /// Empty when resolution failed
    pub resolved_url: String,
    /// Whether the URL came from a default rather than a tenant endpoint
    pub is_default: bool,
    /// The tenant endpoint chosen, if any
    pub used_endpoint: Option<Endpoint>,
    /// Endpoints skipped as unhealthy, in walk order
    pub attempted_urls: Vec<String>,
    pub success: bool,
    pub error: Option<String>,
    pub attempted_at: DateTime<Utc>,
}

impl FallbackChainResult {
    pub fn new(tenant_id: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            service_name: service_name.into(),
            resolved_url: String::new(),
            is_default: false,
            used_endpoint: None,
            attempted_urls: Vec::new(),
            success: false,
            error: None,
            attempted_at: Utc::now(),
        }
    }

    pub(crate) fn resolved(&mut self, url: String, endpoint: Option<Endpoint>, is_default: bool) {
        self.resolved_url = url;
        self.used_endpoint = endpoint;
        self.is_default = is_default;
        self.success = true;
        self.error = None;
    }

    pub(crate) fn failed(&mut self, error: impl Into<String>) {
        self.resolved_url.clear();
        self.used_endpoint = None;
        self.success = false;
        self.error = Some(error.into());
    }
}
