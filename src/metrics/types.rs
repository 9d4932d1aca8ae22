//! # Metrics Types
//!
//! Data structures for JSON stats API responses.

use serde::Serialize;

/// JSON response for GET /v1/stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Uptime in seconds since startup
    pub uptime_seconds: u64,
    /// Health table summary
    pub endpoints: EndpointStats,
    /// Endpoints currently marked unhealthy
    pub unhealthy: Vec<UnhealthyEndpoint>,
}

/// Counts over the health table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EndpointStats {
    /// Endpoints with at least one reported outcome
    pub tracked: usize,
    pub healthy: usize,
    pub unhealthy: usize,
}

/// One endpoint past its failure threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnhealthyEndpoint {
    pub tenant_id: String,
    pub service_name: String,
    pub url: String,
    pub consecutive_fails: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}
