use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use samuday::cli::{run_command, Cli};
use samuday::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("samuday v{}", env!("CARGO_PKG_VERSION"));

    run_command(&cli, &config).await
}
