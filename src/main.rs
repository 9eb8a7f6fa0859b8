//! blobput - Azure Blob Storage SAS uploader
//!
//! Uploads a file as a block blob using a pre-signed Shared Access Signature.

use blobput::cli::Cli;
use blobput::config;
use blobput::error::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        error!("Error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Validation happens per command, config commands must work on partial config
    let config = config::load_config().await?;

    // Initialize logging
    init_logging(cli.debug || config.debug);
    info!("Starting blobput");

    cli.execute(config).await?;

    Ok(())
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "blobput=debug" } else { "blobput=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
