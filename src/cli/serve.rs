//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{LogFormat, WaypointConfig};
use crate::health::HealthTracker;
use crate::registry::ServiceRegistry;
use crate::store::MemoryStore;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load a config file if it exists, otherwise defaults, then apply env overrides
pub fn load_config(path: &Path) -> Result<WaypointConfig, Box<dyn std::error::Error>> {
    let config = if path.exists() {
        WaypointConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        WaypointConfig::default()
    };

    Ok(config.with_env_overrides())
}

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<WaypointConfig, Box<dyn std::error::Error>> {
    let mut config = load_config(&args.config)?;

    // CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Build a registry over a fresh in-memory store and load the config's seeds into it
pub async fn build_registry(
    config: &WaypointConfig,
) -> Result<Arc<ServiceRegistry>, Box<dyn std::error::Error>> {
    let store = Arc::new(MemoryStore::new());
    let health = Arc::new(HealthTracker::with_fail_threshold(
        config.registry.default_fail_threshold,
    ));
    let registry = ServiceRegistry::new(store, health)
        .with_store_timeout(config.registry.store_timeout());

    for default in &config.defaults {
        registry.upsert_default_config(default.clone()).await?;
        tracing::info!(
            service = %default.service_name,
            url = %default.service_url,
            "Loaded default service from config"
        );
    }

    for service in &config.services {
        registry.upsert_service_config(service.clone()).await?;
        tracing::info!(
            tenant_id = %service.tenant_id,
            service = %service.service_name,
            primary = %service.primary_endpoint.url,
            fallbacks = service.fallback_chain.len(),
            "Loaded tenant service from config"
        );
    }

    Ok(Arc::new(registry))
}

/// Build API router with all endpoints
fn build_api_router(
    registry: Arc<ServiceRegistry>,
    config: Arc<WaypointConfig>,
) -> (axum::Router, Arc<AppState>) {
    let app_state = Arc::new(AppState::new(registry, config));
    let router = create_router(Arc::clone(&app_state));
    (router, app_state)
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {}
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load and merge configuration
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;

    tracing::info!("Starting Waypoint server");
    tracing::debug!(?config, "Loaded configuration");

    // 3. Create registry and load seeds
    let registry = build_registry(&config).await?;

    // 4. Build API router
    let config_arc = Arc::new(config.clone());
    let (app, _app_state) = build_api_router(registry, config_arc);

    // 5. Bind and serve
    let cancel_token = CancellationToken::new();
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(addr = %addr, "Waypoint API server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token.clone()))
        .await?;

    tracing::info!("Waypoint server stopped");
    Ok(())
}
