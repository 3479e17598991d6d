//! Initial catalog contents.

use catalog_engine::{product_schema, Catalog, Product, ProductImage};
use std::path::Path;

/// Errors loading a seed file.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("seed file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("seed file does not match the product shape: {0}")]
    Invalid(#[from] catalog_engine::Error),
}

/// The built-in demo catalog. Two records deliberately share a number.
pub fn builtin_products() -> Vec<Product> {
    vec![
        Product::new(
            "singing coach unlimited",
            "b0006se5bq",
            "singing coach unlimited - electronic learning products (win me nt 2000 xp)",
        )
        .with_image(ProductImage::new(
            "https://picsum.photos/400/300",
            "singing coach",
        ))
        .with_image(ProductImage::new(
            "https://broken.link.for.testing.notexistingtopleveldomain/400/300",
            "front side",
        )),
        Product::new(
            "adobe after effects professional 6.5 upgrade from standard to professional",
            "b00021xhzw",
            "upgrade only; installation of after effects standard new disk caching tools speed up \
             your interactive work save any combination of animation parameters as presets",
        ),
        Product::new(
            "domino designer/developer v5.0",
            "b00021xhzw",
            "reference domino designer/developer r5 doc pack includes the following titles: \
             application development with domino designer (intermediate-advanced) 536 pages",
        )
        .with_image(ProductImage::new("https://picsum.photos/400/300", "cover")),
    ]
}

/// Parse and validate a JSON array of products.
pub fn parse_seed(json: &str) -> Result<Vec<Product>, SeedError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    product_schema().validate_list(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// Build the startup catalog from `path`, or from the built-in seed.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, SeedError> {
    let products = match path {
        Some(path) => parse_seed(&std::fs::read_to_string(path)?)?,
        None => builtin_products(),
    };
    Ok(Catalog::from_products(products))
}
