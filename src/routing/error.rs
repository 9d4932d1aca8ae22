//! Error types for resolution failures

use super::FallbackChainResult;
use thiserror::Error;

/// Errors that can occur while resolving a service URL.
///
/// Every variant carries the resolution trace.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No tenant override and no default resolved for the service
    #[error("no configuration found for service '{}'", .0.service_name)]
    NotFound(Box<FallbackChainResult>),

    /// A config exists but none of its endpoints is usable
    #[error("no healthy endpoint available for service '{}'", .0.service_name)]
    Unavailable(Box<FallbackChainResult>),
}

impl ResolveError {
    pub fn trace(&self) -> &FallbackChainResult {
        match self {
            ResolveError::NotFound(trace) | ResolveError::Unavailable(trace) => trace,
        }
    }

    pub fn into_trace(self) -> FallbackChainResult {
        match self {
            ResolveError::NotFound(trace) | ResolveError::Unavailable(trace) => *trace,
        }
    }
}
