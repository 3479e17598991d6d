//! Query handlers - read-only lookups against the catalog.

use crate::error::{AppError, Result};
use catalog_engine::{Catalog, Lookup, Product, ProductsResponse};

/// Every product, in catalog order.
pub fn handle_list(catalog: &Catalog) -> Vec<Product> {
    catalog.all().to_vec()
}

/// Products whose name or number equals `key`, ignoring case.
///
/// One match is returned bare, several as a list.
pub fn handle_find(catalog: &Catalog, key: &str) -> Result<ProductsResponse> {
    let matches: Vec<Product> = catalog
        .find(&Lookup::any(key))
        .into_iter()
        .cloned()
        .collect();

    ProductsResponse::from_matches(matches).ok_or_else(|| AppError::NotFound(key.to_string()))
}
