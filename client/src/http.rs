//! HTTP client for the catalog API.

use catalog_engine::{
    patch_schema, product_schema, Error, Product, ProductPatch, ProductsResponse,
    ValidationDetails,
};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;

type Result<T> = catalog_engine::error::Result<T>;

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    details: Option<ValidationDetails>,
}

/// Client for the catalog REST API.
///
/// Every payload the server returns is validated against the product shape
/// before it is handed to callers.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: Url,
}

impl CatalogClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing reqwest client.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the product collection.
    pub fn products_url(&self) -> Result<Url> {
        self.join("products")
    }

    /// URL of a single key; the key is percent-encoded as one path segment.
    ///
    /// URL parsing folds `.` and `..` segments (encoded or not) into the
    /// parent path, so empty and dot-only keys cannot be addressed and are
    /// refused rather than sent to another resource.
    pub fn product_url(&self, key: &str) -> Result<Url> {
        if key.chars().all(|c| c == '.') {
            return Err(Error::NetworkFailure(format!(
                "invalid request URL: key {key:?} is not a usable path segment"
            )));
        }
        self.join(&format!("products/{}", urlencoding::encode(key)))
    }

    /// Fetch the whole catalog.
    pub async fn get_products(&self) -> Result<Vec<Product>> {
        let url = self.products_url()?;
        let response = self.client.get(url).send().await.map_err(network)?;
        let value = read_json(response, None).await?;

        product_schema().validate_list(&value)?;
        serde_json::from_value(value).map_err(invalid_payload)
    }

    /// Fetch the product(s) whose name or number equals `key`.
    pub async fn get_product(&self, key: &str) -> Result<ProductsResponse> {
        let url = self.product_url(key)?;
        let response = self.client.get(url).send().await.map_err(network)?;
        let value = read_json(response, Some(key)).await?;

        product_schema().validate_one_or_many(&value)?;
        serde_json::from_value(value).map_err(invalid_payload)
    }

    /// Apply `patch` to every product whose name or number equals `key`.
    ///
    /// The patch is checked locally first, so an invalid patch never leaves
    /// the process.
    pub async fn patch_product(&self, key: &str, patch: &ProductPatch) -> Result<ProductsResponse> {
        patch.validate()?;
        let body = serde_json::to_value(patch).map_err(invalid_payload)?;
        patch_schema().validate(&body)?;

        let url = self.product_url(key)?;
        let response = self
            .client
            .patch(url)
            .json(&body)
            .send()
            .await
            .map_err(network)?;
        let value = read_json(response, Some(key)).await?;

        product_schema().validate_one_or_many(&value)?;
        serde_json::from_value(value).map_err(invalid_payload)
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::NetworkFailure(format!("invalid request URL: {e}")))
    }
}

/// Read a JSON body, mapping error statuses onto the error taxonomy.
async fn read_json(response: reqwest::Response, key: Option<&str>) -> Result<Value> {
    let status = response.status();
    if status.is_success() {
        return response.json().await.map_err(network);
    }

    let body: Option<ErrorBody> = response.json().await.ok();
    tracing::debug!(%status, ?key, "Catalog request failed");

    match (status, key, body) {
        (StatusCode::NOT_FOUND, Some(key), _) => Err(Error::NotFound(key.to_string())),
        (
            StatusCode::BAD_REQUEST,
            _,
            Some(ErrorBody {
                details: Some(details),
                ..
            }),
        ) => Err(Error::ValidationFailed(details)),
        (status, _, body) => {
            let message = body
                .and_then(|b| b.error)
                .unwrap_or_else(|| "Request failed".to_string());
            Err(Error::NetworkFailure(format!("{message} ({status})")))
        }
    }
}

fn network(e: reqwest::Error) -> Error {
    Error::NetworkFailure(e.to_string())
}

fn invalid_payload(e: serde_json::Error) -> Error {
    Error::invalid(format!("Invalid payload: {e}"))
}
