//! Product Catalog Server binary.

use catalog_server::config::Config;
use catalog_server::{app, seed, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting Catalog Server on {}", config.bind_addr());

    // Load the initial catalog
    let catalog = seed::load_catalog(config.catalog_seed.as_deref())?;
    match &config.catalog_seed {
        Some(path) => tracing::info!("Loaded {} products from {}", catalog.len(), path.display()),
        None => tracing::info!("Loaded {} built-in products", catalog.len()),
    }

    let addr = config.bind_addr();
    let state = AppState::new(catalog, config);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}
