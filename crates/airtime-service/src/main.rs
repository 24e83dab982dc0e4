//! Airtime Giveaway Service - HTTP API entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use airtime_service::{create_router, AppState, ServiceConfig};
use airtime_store::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,airtime_service=debug,airtime_store=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting airtime giveaway service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        database_path = %config.database_path,
        environment = %config.environment,
        provider_configured = %config.provider_retailer.is_some(),
        simulated = %config.simulate_provider(),
        "Service configuration loaded"
    );

    // Open the database and apply migrations
    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let db = Database::new(DbConfig::new(&config.database_path)).await?;

    // Build app state
    let state = AppState::new(db, config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
