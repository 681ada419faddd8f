//! Chipledger API Server
//!
//! Main entry point for the player ledger service.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chipledger_api::{AppState, create_router};
use chipledger_core::ledger::{LedgerFile, LedgerService};
use chipledger_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chipledger=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Open the ledger, creating the backing file if needed
    let file = LedgerFile::new(&config.ledger.path, config.ledger.corruption_policy);
    let ledger = tokio::task::spawn_blocking(move || LedgerService::open(file))
        .await?
        .context("Failed to open ledger")?;
    info!(
        path = %config.ledger.path.display(),
        policy = ?config.ledger.corruption_policy,
        "Ledger ready"
    );

    if let Some(dir) = &config.static_files.dir {
        info!(dir = %dir.display(), "Serving static files");
    }

    // Create router
    let app = create_router(AppState::new(ledger), config.static_files.dir.as_deref());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
