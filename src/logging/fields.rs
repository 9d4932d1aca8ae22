//! Field extraction helpers for structured logging

use crate::registry::{ErrorKind, RegistryError};
use crate::routing::FallbackChainResult;

/// Extract status and error message from a resolution result
///
/// Returns a tuple of (status, error_message).
/// - For resolved tenant endpoints: ("tenant", None)
/// - For resolved defaults: ("default", None)
/// - For failures: (error kind, Some(error_message))
///
/// # Examples
///
/// ```
/// use waypoint::logging::resolution_status;
/// use waypoint::registry::RegistryError;
///
/// let result = Err(RegistryError::DefaultNotFound("billing".to_string()));
/// let (status, message) = resolution_status(&result);
/// assert_eq!(status, "not_found");
/// assert_eq!(message.as_deref(), Some("default config not found: billing"));
/// ```
pub fn resolution_status(
    result: &Result<FallbackChainResult, RegistryError>,
) -> (&'static str, Option<String>) {
    match result {
        Ok(trace) if trace.is_default => ("default", None),
        Ok(_) => ("tenant", None),
        Err(e) => {
            let status = match e.kind() {
                ErrorKind::Validation => "invalid",
                ErrorKind::NotFound => "not_found",
                ErrorKind::Unavailable => "unavailable",
                ErrorKind::Internal => "error",
            };
            (status, Some(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_status_success() {
        let mut trace = FallbackChainResult::new("acme", "billing");
        trace.resolved("http://a".to_string(), None, false);
        assert_eq!(resolution_status(&Ok(trace.clone())), ("tenant", None));

        trace.is_default = true;
        assert_eq!(resolution_status(&Ok(trace)), ("default", None));
    }

    #[test]
    fn test_resolution_status_unavailable() {
        let trace = FallbackChainResult::new("acme", "billing");
        let err = RegistryError::Resolve(crate::routing::ResolveError::Unavailable(Box::new(
            trace,
        )));
        let (status, message) = resolution_status(&Err(err));
        assert_eq!(status, "unavailable");
        assert!(message.unwrap().contains("billing"));
    }
}
