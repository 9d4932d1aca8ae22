/// Errors raised when a configuration document fails validation on the write path.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("tenant_id is required")]
    TenantIdRequired,

    #[error("service_name is required")]
    ServiceNameRequired,

    #[error("primary_endpoint is required")]
    PrimaryEndpointRequired,

    #[error("service_url is required")]
    ServiceUrlRequired,
}
