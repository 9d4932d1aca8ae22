//! Structured logging helpers
//!
//! Builds the `tracing` filter from [`crate::config::LoggingConfig`] and
//! extracts the fields logged for each resolution.

pub mod fields;

pub use fields::resolution_status;

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
/// Components are emitted in name order so the result is stable.
///
/// # Examples
///
/// ```
/// use waypoint::config::logging::{LogFormat, LoggingConfig};
/// use waypoint::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("routing".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,waypoint::routing=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",waypoint::{}={}", component, level));
        }
    }

    filter_str
}
