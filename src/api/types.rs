//! Request and response bodies for the HTTP API.

use crate::health::ServiceStatus;
use crate::metrics::EndpointStats;
use crate::model::ServiceConfig;
use serde::{Deserialize, Serialize};

/// Query for `GET …/resolve`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResolveQuery {
    /// Use the health-aware fallback walk instead of load balancing
    pub health: bool,
}

/// Body for `POST …/health`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportOutcomeRequest {
    pub url: String,
    pub healthy: bool,
}

/// Query for `DELETE …/health`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvalidateQuery {
    pub url: Option<String>,
}

/// Response for `GET /v1/tenants/:tenant/services`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceListResponse {
    pub tenant_id: String,
    pub services: Vec<ServiceConfig>,
}

/// Response for `GET …/health`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EndpointHealthResponse {
    pub tenant_id: String,
    pub service_name: String,
    /// Primary first, then the fallback chain, in stored order
    pub endpoints: Vec<ServiceStatus>,
}

/// Response for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub endpoints: EndpointStats,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_query_defaults_to_load_balanced() {
        let query: ResolveQuery = serde_json::from_value(json!({})).unwrap();
        assert!(!query.health);
    }

    #[test]
    fn test_report_outcome_request_requires_fields() {
        let parsed: Result<ReportOutcomeRequest, _> =
            serde_json::from_value(json!({"url": "http://a"}));
        assert!(parsed.is_err());

        let parsed: ReportOutcomeRequest =
            serde_json::from_value(json!({"url": "http://a", "healthy": false})).unwrap();
        assert!(!parsed.healthy);
    }
}
