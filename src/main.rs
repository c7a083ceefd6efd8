use anyhow::Result;
use std::sync::Arc;

use bidder_backend::services::LiveProviders;
use bidder_backend::{app, config, db, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        "Starting bidder backend"
    );

    // Create database pool and schema
    let pool = db::create_pool(&settings).await?;
    db::init_schema(&pool).await?;

    // Create public data providers
    let providers = Arc::new(LiveProviders::new(&settings)?);

    // Create application state
    let state = app::AppState::new(pool, settings.clone(), providers);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
