use clap::Parser;
use tracing_subscriber::EnvFilter;

use lineage_cli::cli;
use lineage_cli::config::AppConfig;

fn main() {
    let cli = cli::Cli::parse();
    let config = AppConfig::load_or_default(&cli.config);

    // RUST_LOG wins; otherwise the configured level.
    let level = config
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = match config {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Fatal error: {}", e);
            std::process::exit(1);
        }
    };

    let rt = tokio::runtime::Runtime::new().expect("Failed to create Tokio runtime");
    rt.block_on(async {
        if let Err(e) = cli::run(cli, config).await {
            tracing::error!("Fatal error: {}", e);
            std::process::exit(1);
        }
    });
}
