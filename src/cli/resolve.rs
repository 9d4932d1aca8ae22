//! Resolve command implementation

use crate::cli::output::{format_trace_json, format_trace_pretty};
use crate::cli::serve::{build_registry, load_config};
use crate::cli::ResolveArgs;
use crate::registry::RegistryError;

/// Handle `waypoint resolve` command
///
/// Loads the config's seeds into a fresh registry and resolves once. With
/// `--json` the trace is printed even when resolution fails.
pub async fn handle_resolve(args: &ResolveArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_config(&args.config)?;
    config.validate()?;
    let registry = build_registry(&config).await?;

    let result = if args.health {
        registry
            .resolve_with_health(&args.tenant, &args.service)
            .await
    } else {
        registry.resolve(&args.tenant, &args.service).await
    };

    match result {
        Ok(trace) if args.json => Ok(format_trace_json(&trace)?),
        Ok(trace) => Ok(format_trace_pretty(&trace)),
        Err(RegistryError::Resolve(e)) if args.json => {
            println!("{}", format_trace_json(e.trace())?);
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const SEEDS: &str = r#"
[[defaults]]
service_name = "auth"
service_url = "http://auth.shared"

[[services]]
tenant_id = "acme"
service_name = "billing"
[services.primary_endpoint]
url = "http://billing-a"
"#;

    fn args(config: PathBuf, tenant: &str, service: &str) -> ResolveArgs {
        ResolveArgs {
            tenant: tenant.to_string(),
            service: service.to_string(),
            config,
            health: false,
            json: false,
        }
    }

    #[tokio::test]
    async fn test_resolve_tenant_service() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), SEEDS).unwrap();

        let output = handle_resolve(&args(temp.path().to_path_buf(), "acme", "billing"))
            .await
            .unwrap();
        assert_eq!(output, "http://billing-a");
    }

    #[tokio::test]
    async fn test_resolve_default_service_json() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), SEEDS).unwrap();

        let mut resolve_args = args(temp.path().to_path_buf(), "acme", "auth");
        resolve_args.json = true;

        let output = handle_resolve(&resolve_args).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["resolved_url"], "http://auth.shared");
        assert_eq!(parsed["is_default"], true);
    }

    #[tokio::test]
    async fn test_resolve_unknown_service_fails() {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), SEEDS).unwrap();

        let err = handle_resolve(&args(temp.path().to_path_buf(), "acme", "user"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no configuration found"));
    }
}
