//! Presentational state for the listing and detail pages.

use catalog_engine::{CacheState, Error, Product, ProductsResponse};

/// Link to a product's detail page.
pub fn detail_href(number: &str) -> String {
    format!("/products/{}", urlencoding::encode(number))
}

/// Link to a product's edit page.
pub fn edit_href(number: &str) -> String {
    format!("/products/{}/edit", urlencoding::encode(number))
}

/// Text shown inline when a request fails.
pub fn user_message(error: &Error) -> String {
    match error {
        Error::NotFound(_) => "Product not found".to_string(),
        Error::ValidationFailed(details) => format!("Invalid body: {details}"),
        Error::NetworkFailure(message) => message.clone(),
        other => other.to_string(),
    }
}

/// One row of the product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub name: String,
    pub number: String,
    pub href: String,
}

impl From<&Product> for ListingRow {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            number: product.number.clone(),
            href: detail_href(&product.number),
        }
    }
}

/// What the listing page shows for the current cache state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingView {
    /// Nothing to show yet
    Loading,
    /// Synced, and the catalog is empty
    Empty,
    Rows(Vec<ListingRow>),
}

impl ListingView {
    pub fn from_state(state: &CacheState) -> Self {
        if !state.has_synced_once {
            ListingView::Loading
        } else if state.products.is_empty() {
            ListingView::Empty
        } else {
            ListingView::Rows(state.products.iter().map(ListingRow::from).collect())
        }
    }

    /// Placeholder text, when the view has no rows.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ListingView::Loading => Some("Loading…"),
            ListingView::Empty => Some("No products."),
            ListingView::Rows(_) => None,
        }
    }
}

/// What the detail page shows for a key lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    /// The first matching product; `others` counts the remaining matches
    Found { product: Product, others: usize },
    NotFound,
    Failed(String),
}

impl DetailView {
    pub fn from_result(result: catalog_engine::error::Result<ProductsResponse>) -> Self {
        match result {
            Ok(response) => {
                let others = response.len().saturating_sub(1);
                match response.into_vec().into_iter().next() {
                    Some(product) => DetailView::Found { product, others },
                    None => DetailView::NotFound,
                }
            }
            Err(Error::NotFound(_)) => DetailView::NotFound,
            Err(e) => DetailView::Failed(user_message(&e)),
        }
    }

    pub fn product(&self) -> Option<&Product> {
        match self {
            DetailView::Found { product, .. } => Some(product),
            _ => None,
        }
    }
}
