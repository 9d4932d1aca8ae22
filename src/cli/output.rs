//! Output formatting helpers for CLI commands

use crate::model::ServiceConfig;
use crate::routing::FallbackChainResult;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// View model for service display
#[derive(Debug, Clone, serde::Serialize)]
pub struct ServiceView {
    pub service_name: String,
    pub primary_url: String,
    pub fallbacks: Vec<String>,
    pub strategy: String,
    pub default_service_url: String,
    pub is_active: bool,
}

impl From<&ServiceConfig> for ServiceView {
    fn from(config: &ServiceConfig) -> Self {
        Self {
            service_name: config.service_name.clone(),
            primary_url: config.primary_endpoint.url.clone(),
            fallbacks: config.fallback_chain.iter().map(|e| e.url.clone()).collect(),
            strategy: config.load_balance_strategy.to_string(),
            default_service_url: config.default_service_url.clone(),
            is_active: config.is_active,
        }
    }
}

/// Format services as a table
pub fn format_services_table(services: &[ServiceView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Service", "Primary", "Fallbacks", "Strategy", "Default", "Active",
    ]);

    for s in services {
        let active_str = if s.is_active {
            "yes".green().to_string()
        } else {
            "no".red().to_string()
        };
        let default_str = if s.default_service_url.is_empty() {
            "-".to_string()
        } else {
            s.default_service_url.clone()
        };

        table.add_row(vec![
            Cell::new(&s.service_name),
            Cell::new(&s.primary_url),
            Cell::new(s.fallbacks.len()),
            Cell::new(&s.strategy),
            Cell::new(default_str),
            Cell::new(active_str),
        ]);
    }

    table.to_string()
}

/// Format services as JSON
pub fn format_services_json(
    tenant_id: &str,
    services: &[ServiceView],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({
        "tenant_id": tenant_id,
        "services": services
    }))
}

/// Format a resolution trace for humans
///
/// The resolved URL is printed on its own first line so the output can be
/// piped; skipped endpoints follow on stderr-friendly indented lines.
pub fn format_trace_pretty(trace: &FallbackChainResult) -> String {
    let mut output = trace.resolved_url.clone();

    if trace.is_default {
        output.push_str(&format!(" {}", "(default)".yellow()));
    }
    for url in &trace.attempted_urls {
        output.push_str(&format!("\n  {} {}", "skipped".red(), url));
    }

    output
}

/// Format a resolution trace as JSON
pub fn format_trace_json(trace: &FallbackChainResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(trace)
}
