use anyhow::Result;
use clap::Parser;
use nido::config::Config;
use nido::db;
use nido::directory::SqliteDirectory;
use nido::gateway::{self, AppState};
use nido::regulator::Regulator;
use nido::shadow::mediator::Mediator;
use nido::shadow::store::{HttpShadowStore, ShadowStore};
use nido::telemetry::SqliteTelemetry;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "nido", about = "Voice-driven control service for a networked egg incubator")]
struct Args {
    /// Path to config.toml (defaults to ~/.nido/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the configured bind port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install default crypto provider for Rustls TLS before any reqwest
    // client is built.
    if let Err(e) = rustls::crypto::ring::default_provider().install_default() {
        eprintln!("Warning: Failed to install default crypto provider: {e:?}");
    }

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let pool = db::open_pool(&config.store.db_path).await?;

    let store: Arc<dyn ShadowStore> = Arc::new(HttpShadowStore::new(
        &config.shadow.endpoint,
        Duration::from_secs(config.shadow.request_timeout_secs),
    ));
    let state = AppState {
        mediator: Arc::new(Mediator::new(
            Arc::new(SqliteDirectory::new(pool.clone())),
            store.clone(),
        )),
        telemetry: Arc::new(SqliteTelemetry::new(pool)),
        regulator: Arc::new(Regulator::new(store)),
    };

    let host = args.host.unwrap_or_else(|| config.gateway.host.clone());
    let port = args.port.unwrap_or(config.gateway.port);
    gateway::run_gateway(&host, port, state).await
}
