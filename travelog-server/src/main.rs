use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use travelog_api::ApiServer;
use travelog_core::AppConfig;
use travelog_store::EntryStore;

#[derive(Parser, Debug)]
#[command(name = "travelog", version, about = "Travelog — travel-log REST backend")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "travelog.yaml")]
    config: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // ── Tracing ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_target(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "Travelog starting");

    // ── Config ──
    let config = if cli.config.exists() {
        info!(path = %cli.config.display(), "Loading config file");
        AppConfig::load(&cli.config)?
    } else {
        info!("No config file found, using defaults");
        AppConfig::default()
    };

    // ── Store: open at startup, state restored from file ──
    let store = Arc::new(EntryStore::open(&config.store));
    info!(
        collection = store.collection(),
        entries = store.len(),
        "Store opened"
    );

    // ── API server ──
    ApiServer::new(config.server, store).start().await
}
