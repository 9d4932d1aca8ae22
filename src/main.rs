use clap::Parser;
use waypoint::cli::{
    handle_completions, handle_config_init, resolve, services, Cli, Commands, ConfigCommands,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => waypoint::cli::serve::run_serve(args).await,
        Commands::Resolve(args) => resolve::handle_resolve(&args).await.map(|output| {
            println!("{}", output);
        }),
        Commands::Services(args) => services::handle_services(&args).await.map(|output| {
            println!("{}", output);
        }),
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Init(args) => handle_config_init(&args),
        },
        Commands::Completions(args) => {
            handle_completions(&args);
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
