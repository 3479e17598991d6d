//! Single-vs-list response shape.
//!
//! Key lookups and patches answer with a bare product when exactly one record
//! matched and with an array when several did. Existing clients depend on
//! this shape, so it is kept even though a plain array would be simpler.

use crate::Product;
use serde::{Deserialize, Serialize};

/// Body of a successful key lookup or patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductsResponse {
    One(Product),
    Many(Vec<Product>),
}

impl ProductsResponse {
    /// Shape a match list. Returns `None` for zero matches.
    pub fn from_matches(mut matches: Vec<Product>) -> Option<Self> {
        match matches.len() {
            0 => None,
            1 => matches.pop().map(ProductsResponse::One),
            _ => Some(ProductsResponse::Many(matches)),
        }
    }

    /// The first product, which is what detail views display.
    pub fn first(&self) -> Option<&Product> {
        match self {
            ProductsResponse::One(p) => Some(p),
            ProductsResponse::Many(list) => list.first(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ProductsResponse::One(_) => 1,
            ProductsResponse::Many(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<Product> {
        match self {
            ProductsResponse::One(p) => vec![p],
            ProductsResponse::Many(list) => list,
        }
    }
}

impl From<Product> for ProductsResponse {
    fn from(product: Product) -> Self {
        ProductsResponse::One(product)
    }
}

impl From<Vec<Product>> for ProductsResponse {
    fn from(products: Vec<Product>) -> Self {
        ProductsResponse::Many(products)
    }
}

impl From<ProductsResponse> for Vec<Product> {
    fn from(response: ProductsResponse) -> Self {
        response.into_vec()
    }
}
