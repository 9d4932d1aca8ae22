//! Configuration module for Waypoint
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`WAYPOINT_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use waypoint::config::WaypointConfig;
//!
//! let config = WaypointConfig::default();
//! assert_eq!(config.server.port, 7600);
//!
//! let toml = r#"
//! [server]
//! port = 9000
//! "#;
//! let config: WaypointConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! ```

pub mod error;
pub mod logging;
pub mod registry;
pub mod server;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use registry::RegistrySettings;
pub use server::ServerConfig;

use crate::model::{DefaultServiceConfig, ServiceConfig, ValidationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Waypoint server and CLI.
///
/// Besides runtime settings, a config file may seed tenant service configs
/// (`[[services]]`) and system defaults (`[[defaults]]`) into the in-memory
/// store at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WaypointConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Resolver and health tracker settings
    pub registry: RegistrySettings,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Tenant service configs loaded at startup
    pub services: Vec<ServiceConfig>,
    /// Default service configs loaded at startup
    pub defaults: Vec<DefaultServiceConfig>,
}

impl WaypointConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are ignored and the current value is kept.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("WAYPOINT_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("WAYPOINT_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("WAYPOINT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("WAYPOINT_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "port must be non-zero",
            ));
        }

        if self.registry.default_fail_threshold == 0 {
            return Err(ConfigError::validation(
                "registry.default_fail_threshold",
                "fail threshold must be at least 1",
            ));
        }

        for (i, service) in self.services.iter().enumerate() {
            service
                .validate()
                .map_err(|e| ConfigError::validation(seed_field("services", i, &e), e.to_string()))?;
        }

        for (i, default) in self.defaults.iter().enumerate() {
            default
                .validate()
                .map_err(|e| ConfigError::validation(seed_field("defaults", i, &e), e.to_string()))?;
        }

        Ok(())
    }
}

fn seed_field(section: &str, index: usize, err: &ValidationError) -> String {
    let field = match err {
        ValidationError::TenantIdRequired => "tenant_id",
        ValidationError::ServiceNameRequired => "service_name",
        ValidationError::PrimaryEndpointRequired => "primary_endpoint.url",
        ValidationError::ServiceUrlRequired => "service_url",
    };
    format!("{}[{}].{}", section, index, field)
}
