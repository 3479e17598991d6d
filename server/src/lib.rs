//! Product Catalog Server - mock REST API over an in-memory catalog.
//!
//! Serves the catalog as JSON and accepts partial patches keyed by product
//! name or number. State lives in memory only and is lost on restart.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod seed;

use crate::config::Config;
use axum::Router;
use catalog_engine::Catalog;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// The catalog shared by all handlers.
pub type SharedCatalog = Arc<RwLock<Catalog>>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: SharedCatalog,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: Config) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            config: Arc::new(config),
        }
    }
}

/// Build the application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
