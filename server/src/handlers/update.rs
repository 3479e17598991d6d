//! Update handler - applies partial patches to matching products.

use crate::error::{AppError, Result};
use catalog_engine::{
    patch_schema, Catalog, Lookup, ProductPatch, ProductsResponse, ValidationDetails,
};

/// Validate a raw JSON body and apply it to every product whose name or
/// number equals `key`.
///
/// Nothing is mutated unless the body passes validation.
pub fn handle_patch(catalog: &mut Catalog, key: &str, body: &[u8]) -> Result<ProductsResponse> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(invalid_json)?;
    patch_schema().validate(&value)?;
    let patch: ProductPatch = serde_json::from_value(value).map_err(invalid_json)?;

    let updated = catalog.update(&Lookup::any(key), &patch)?;
    tracing::debug!(key, matched = updated.len(), "Patched products");

    ProductsResponse::from_matches(updated).ok_or_else(|| AppError::NotFound(key.to_string()))
}

fn invalid_json(e: serde_json::Error) -> AppError {
    let mut details = ValidationDetails::default();
    details.push_form_error(format!("Invalid JSON: {e}"));
    AppError::InvalidBody(details)
}
