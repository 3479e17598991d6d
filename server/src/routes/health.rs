//! Liveness and banner endpoints.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Records currently held in memory
    pub products: usize,
    /// Where the startup catalog came from: a seed file path or "built-in"
    pub seed: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/", get(banner))
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let products = state.catalog.read().await.len();
    let seed = match &state.config.catalog_seed {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        products,
        seed,
    })
}

async fn banner() -> &'static str {
    "Product Catalog API"
}
