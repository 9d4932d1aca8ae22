use std::fmt;

/// Natural key of a tenant service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServiceKey {
    pub tenant_id: String,
    pub service_name: String,
}

impl ServiceKey {
    pub fn new(tenant_id: impl Into<String>, service_name: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            service_name: service_name.into(),
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tenant_id, self.service_name)
    }
}

/// Key of a single endpoint's health record.
///
/// The same URL may appear under several tenants or services; each
/// combination is tracked independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointKey {
    pub tenant_id: String,
    pub service_name: String,
    pub url: String,
}

impl EndpointKey {
    pub fn new(
        tenant_id: impl Into<String>,
        service_name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            service_name: service_name.into(),
            url: url.into(),
        }
    }

    /// Key of the owning service configuration.
    pub fn service(&self) -> ServiceKey {
        ServiceKey::new(self.tenant_id.clone(), self.service_name.clone())
    }
}
