//! Tryst CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tryst::cli::{commands, Cli, Commands};
use tryst::infrastructure::config::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(err) => tryst::cli::handle_error(err, cli.json),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let result = match cli.command {
        Commands::Init(args) => commands::init::execute(args, cli.json).await,
        Commands::Partner(args) => commands::partner::execute(args, &config, cli.json).await,
        Commands::Log(args) => commands::encounter::execute_log(args, &config, cli.json).await,
        Commands::Encounters(args) => {
            commands::encounter::execute_list(args, &config, cli.json).await
        }
        Commands::Recommend(args) => commands::recommend::execute(args, &config, cli.json).await,
        Commands::Stats(args) => commands::stats::execute(args, &config, cli.json).await,
    };

    if let Err(err) = result {
        tryst::cli::handle_error(err, cli.json);
    }
}
