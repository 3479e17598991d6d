//! Catalog - the server-side record store.
//!
//! The catalog is an ordered sequence of products mutated in place. Lookups
//! return every match in catalog order; patches touch every match and keep
//! each record at its position.

use crate::{error::Result, Error, Product, ProductPatch};
use serde::{Deserialize, Serialize};

/// Which key a lookup compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Match on `name` only
    Name(String),
    /// Match on `number` only
    Number(String),
    /// Match when either `name` or `number` equals the key
    Any(String),
}

impl Lookup {
    pub fn name(key: impl Into<String>) -> Self {
        Lookup::Name(key.into())
    }

    pub fn number(key: impl Into<String>) -> Self {
        Lookup::Number(key.into())
    }

    pub fn any(key: impl Into<String>) -> Self {
        Lookup::Any(key.into())
    }

    /// The raw key.
    pub fn key(&self) -> &str {
        match self {
            Lookup::Name(k) | Lookup::Number(k) | Lookup::Any(k) => k,
        }
    }

    /// Check whether `product` matches this lookup.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Lookup::Name(k) => product.name_matches(k),
            Lookup::Number(k) => product.number_matches(k),
            Lookup::Any(k) => product.name_matches(k) || product.number_matches(k),
        }
    }
}

/// The in-memory product catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding `products` in the given order.
    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in catalog order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Append a product at the end of the catalog.
    pub fn insert(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Every product whose name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Vec<&Product> {
        self.find(&Lookup::name(name))
    }

    /// Every product whose number matches, ignoring case.
    pub fn find_by_number(&self, number: &str) -> Vec<&Product> {
        self.find(&Lookup::number(number))
    }

    /// Every product matching `lookup`, in catalog order.
    pub fn find(&self, lookup: &Lookup) -> Vec<&Product> {
        self.products.iter().filter(|p| lookup.matches(p)).collect()
    }

    /// Positions of the products matching `lookup`.
    pub fn positions(&self, lookup: &Lookup) -> Vec<usize> {
        self.products
            .iter()
            .enumerate()
            .filter(|(_, p)| lookup.matches(p))
            .map(|(i, _)| i)
            .collect()
    }

    /// Apply `patch` to every product matching `lookup`.
    ///
    /// The patch is validated before anything is touched. Matches are resolved
    /// before mutation, so a patch that renames records still updates exactly
    /// the records that matched the original key. Returns the updated records
    /// in catalog order.
    pub fn update(&mut self, lookup: &Lookup, patch: &ProductPatch) -> Result<Vec<Product>> {
        patch.validate()?;

        let positions = self.positions(lookup);
        if positions.is_empty() {
            return Err(Error::NotFound(lookup.key().to_string()));
        }

        let mut updated = Vec::with_capacity(positions.len());
        for i in positions {
            let product = self
                .products
                .get_mut(i)
                .ok_or_else(|| Error::NotFound(lookup.key().to_string()))?;
            product.apply_patch(patch);
            updated.push(product.clone());
        }

        Ok(updated)
    }
}
