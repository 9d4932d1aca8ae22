//! Services command implementation

use crate::cli::output::{format_services_json, format_services_table, ServiceView};
use crate::cli::serve::{build_registry, load_config};
use crate::cli::ServicesArgs;

/// Handle `waypoint services` command
pub async fn handle_services(args: &ServicesArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config(&args.config)?;
    config.validate()?;
    let registry = build_registry(&config).await?;

    let views: Vec<ServiceView> = registry
        .list_tenant_services(&args.tenant)
        .await?
        .iter()
        .map(ServiceView::from)
        .collect();

    if args.json {
        return Ok(format_services_json(&args.tenant, &views)?);
    }

    if views.is_empty() {
        return Ok(format!("No services configured for tenant '{}'", args.tenant));
    }

    Ok(format_services_table(&views))
}
