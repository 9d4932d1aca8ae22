use crate::model::ValidationError;
use crate::routing::ResolveError;
use crate::store::StoreError;

/// Coarse error category, used to pick transport status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unavailable,
    Internal,
}

/// Errors that can occur during registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("service config not found: {tenant_id}/{service_name}")]
    ConfigNotFound {
        tenant_id: String,
        service_name: String,
    },

    #[error("default config not found: {0}")]
    DefaultNotFound(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl RegistryError {
    pub fn config_not_found(tenant_id: &str, service_name: &str) -> Self {
        RegistryError::ConfigNotFound {
            tenant_id: tenant_id.to_string(),
            service_name: service_name.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Validation(_) => ErrorKind::Validation,
            RegistryError::ConfigNotFound { .. } | RegistryError::DefaultNotFound(_) => {
                ErrorKind::NotFound
            }
            RegistryError::Resolve(ResolveError::NotFound(_)) => ErrorKind::NotFound,
            RegistryError::Resolve(ResolveError::Unavailable(_)) => ErrorKind::Unavailable,
            RegistryError::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<StoreError> for RegistryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Invalid(e) => RegistryError::Validation(e),
            other => RegistryError::Store(other),
        }
    }
}
