//! Product endpoint routes.

use axum::{
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
    routing::get,
    Json, Router,
};
use catalog_engine::{Product, ProductsResponse};

use crate::error::{AppError, Result};
use crate::handlers::{handle_find, handle_list, handle_patch};
use crate::AppState;

/// Create product routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_handler))
        .route("/products/{key}", get(find_handler).patch(patch_handler))
}

/// The percent-decoded `{key}` segment.
///
/// A segment that does not decode to UTF-8 is answered with the JSON error
/// body instead of axum's plain-text rejection.
pub struct ProductKey(pub String);

impl<S: Send + Sync> FromRequestParts<S> for ProductKey {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(key)) => Ok(Self(key)),
            Err(rejection) => Err(AppError::InvalidKey(rejection.body_text())),
        }
    }
}

/// GET /products - The whole catalog.
async fn list_handler(State(state): State<AppState>) -> Json<Vec<Product>> {
    let catalog = state.catalog.read().await;
    Json(handle_list(&catalog))
}

/// GET /products/{key} - Products matching a name or number.
async fn find_handler(
    State(state): State<AppState>,
    ProductKey(key): ProductKey,
) -> Result<Json<ProductsResponse>> {
    let catalog = state.catalog.read().await;
    Ok(Json(handle_find(&catalog, &key)?))
}

/// PATCH /products/{key} - Apply a partial update to every match.
async fn patch_handler(
    State(state): State<AppState>,
    ProductKey(key): ProductKey,
    body: Bytes,
) -> Result<Json<ProductsResponse>> {
    let mut catalog = state.catalog.write().await;
    Ok(Json(handle_patch(&mut catalog, &key, &body)?))
}
