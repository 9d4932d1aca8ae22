//! CLI module for Waypoint
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Start the registry HTTP API
//! - `resolve` - Resolve a tenant service URL from a config file
//! - `services` - List a tenant's configured services
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Start server with default config
//! waypoint serve
//!
//! # Resolve once against the seeded configs
//! waypoint resolve acme billing -c waypoint.toml
//!
//! # Generate shell completions
//! waypoint completions bash > ~/.bash_completion.d/waypoint
//! ```

pub mod completions;
pub mod config;
pub mod output;
pub mod resolve;
pub mod serve;
pub mod services;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Waypoint - Tenant service registry and endpoint resolver
#[derive(Parser, Debug)]
#[command(
    name = "waypoint",
    version,
    about = "Tenant-aware service registry and endpoint resolver"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the Waypoint server
    Serve(ServeArgs),
    /// Resolve a service URL for a tenant
    Resolve(ResolveArgs),
    /// List a tenant's services
    Services(ServicesArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "waypoint.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "WAYPOINT_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "WAYPOINT_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "WAYPOINT_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Tenant identifier
    pub tenant: String,

    /// Logical service name
    pub service: String,

    /// Path to configuration file
    #[arg(short, long, default_value = "waypoint.toml")]
    pub config: PathBuf,

    /// Use the health-aware fallback walk
    #[arg(long)]
    pub health: bool,

    /// Output the full resolution trace as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ServicesArgs {
    /// Tenant identifier
    pub tenant: String,

    /// Path to configuration file
    #[arg(short, long, default_value = "waypoint.toml")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "waypoint.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["waypoint", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("waypoint.toml"));
                assert!(args.host.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_port() {
        let cli = Cli::try_parse_from(["waypoint", "serve", "-p", "9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => assert_eq!(args.port, Some(9000)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_host_and_level() {
        let cli = Cli::try_parse_from([
            "waypoint", "serve", "-H", "127.0.0.1", "-l", "debug", "-c", "custom.toml",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(args.log_level.as_deref(), Some("debug"));
                assert_eq!(args.config, PathBuf::from("custom.toml"));
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_resolve() {
        let cli =
            Cli::try_parse_from(["waypoint", "resolve", "acme", "billing", "--health", "--json"])
                .unwrap();
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.tenant, "acme");
                assert_eq!(args.service, "billing");
                assert!(args.health);
                assert!(args.json);
            }
            _ => panic!("Expected Resolve command"),
        }
    }

    #[test]
    fn test_cli_parse_resolve_requires_service() {
        assert!(Cli::try_parse_from(["waypoint", "resolve", "acme"]).is_err());
    }

    #[test]
    fn test_cli_parse_services() {
        let cli = Cli::try_parse_from(["waypoint", "services", "acme", "--json"]).unwrap();
        match cli.command {
            Commands::Services(args) => {
                assert_eq!(args.tenant, "acme");
                assert!(args.json);
            }
            _ => panic!("Expected Services command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["waypoint", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => {
                assert!(args.force);
                assert_eq!(args.output, PathBuf::from("waypoint.toml"));
            }
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_cli_parse_completions() {
        let cli = Cli::try_parse_from(["waypoint", "completions", "zsh"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions(_)));
    }
}
