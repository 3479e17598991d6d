//! Edit form state.
//!
//! The form keeps the user's edits until a save succeeds. A failed save sets
//! an inline alert and leaves every field as the user left it.

use crate::http::CatalogClient;
use crate::views::user_message;
use catalog_engine::{
    error::Result, product::is_valid_url, BlobStore, Product, ProductImage, ProductPatch,
    ProductsResponse, ProductsStore,
};

/// Which part of an image row is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    Url,
    Name,
}

/// Draft of a product being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    key: String,
    original_name: String,
    pub name: String,
    pub number: String,
    pub description: String,
    images: Vec<ProductImage>,
    image_error: Option<String>,
    submit_error: Option<String>,
}

impl EditForm {
    /// Seed a form from `product`, which was opened under `key`.
    pub fn new(key: impl Into<String>, product: &Product) -> Self {
        Self {
            key: key.into(),
            original_name: product.name.clone(),
            name: product.name.clone(),
            number: product.number.clone(),
            description: product.description.clone(),
            images: product.images.clone(),
            image_error: None,
            submit_error: None,
        }
    }

    /// The key the patch is sent to.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn images(&self) -> &[ProductImage] {
        &self.images
    }

    /// Problem with the last "add image" attempt.
    pub fn image_error(&self) -> Option<&str> {
        self.image_error.as_deref()
    }

    /// Inline alert from the last failed save.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Append an image. Inputs are trimmed; an empty value or an unparseable
    /// URL sets the image error and leaves the list alone.
    pub fn add_image(&mut self, url: &str, name: &str) -> bool {
        self.image_error = None;
        let url = url.trim();
        let name = name.trim();

        if url.is_empty() || name.is_empty() {
            self.image_error = Some("URL and name are required".to_string());
            return false;
        }
        if !is_valid_url(url) {
            self.image_error = Some("Please enter a valid URL".to_string());
            return false;
        }

        self.images.push(ProductImage::new(url, name));
        true
    }

    pub fn remove_image(&mut self, index: usize) -> Option<ProductImage> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    /// Edit one field of an existing image row. Values are taken verbatim.
    pub fn update_image(
        &mut self,
        index: usize,
        field: ImageField,
        value: impl Into<String>,
    ) -> bool {
        let Some(image) = self.images.get_mut(index) else {
            return false;
        };
        match field {
            ImageField::Url => image.url = value.into(),
            ImageField::Name => image.name = value.into(),
        }
        true
    }

    /// The patch a save sends: every field of the form.
    pub fn to_patch(&self) -> ProductPatch {
        ProductPatch::new()
            .name(self.name.clone())
            .number(self.number.clone())
            .description(self.description.clone())
            .images(self.images.clone())
    }

    /// Save the form.
    ///
    /// On success the confirmed record(s) are merged into `store` and the key
    /// to navigate to is returned: the first updated record's number. On
    /// failure the alert is set and the draft is kept.
    pub async fn submit<B: BlobStore>(
        &mut self,
        client: &CatalogClient,
        store: &mut ProductsStore<B>,
    ) -> Result<String> {
        self.submit_error = None;

        let response = match client.patch_product(&self.key, &self.to_patch()).await {
            Ok(response) => response,
            Err(e) => {
                self.submit_error = Some(user_message(&e));
                return Err(e);
            }
        };

        let next = response
            .first()
            .map(|p| p.number.clone())
            .unwrap_or_else(|| self.key.clone());

        let cached = match response {
            ProductsResponse::One(product) => store.replace_renamed(&self.original_name, product),
            many => store.merge_products(many),
        };
        if let Err(e) = cached {
            tracing::warn!(error = %e, "Failed to persist edited product");
        }

        self.original_name = self.name.clone();
        self.key = next.clone();
        Ok(next)
    }
}
