//! Product records and partial patches.

use crate::{error::Result, Error};
use serde::{Deserialize, Serialize};

/// An image attached to a product. Identified only by its position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductImage {
    /// Absolute URL of the image
    pub url: String,
    /// Display name / alt text
    pub name: String,
}

impl ProductImage {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }
}

/// A product in the catalog.
///
/// Neither `name` nor `number` is unique: lookups by either key are defined
/// over the set of matching records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub number: String,
    pub description: String,
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Create a product without images.
    pub fn new(
        name: impl Into<String>,
        number: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            description: description.into(),
            images: Vec::new(),
        }
    }

    /// Builder-style method to attach an image.
    pub fn with_image(mut self, image: ProductImage) -> Self {
        self.images.push(image);
        self
    }

    /// Check whether `name` matches this product's name, ignoring case.
    pub fn name_matches(&self, name: &str) -> bool {
        keys_match(&self.name, name)
    }

    /// Check whether `number` matches this product's number, ignoring case.
    pub fn number_matches(&self, number: &str) -> bool {
        keys_match(&self.number, number)
    }

    /// Overwrite the fields present in `patch`, leaving the rest untouched.
    pub fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(number) = &patch.number {
            self.number = number.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(images) = &patch.images {
            self.images = images.clone();
        }
    }

    /// Validate field contents that the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        validate_images(&self.images)
    }
}

/// Case-insensitive key equality.
pub fn keys_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// A partial update. `None` means "leave as is"; `Some("")` still overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ProductImage>>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn images(mut self, images: Vec<ProductImage>) -> Self {
        self.images = Some(images);
        self
    }

    /// True when the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.number.is_none()
            && self.description.is_none()
            && self.images.is_none()
    }

    /// Validate the patch before it is applied to anything.
    pub fn validate(&self) -> Result<()> {
        match &self.images {
            Some(images) => validate_images(images),
            None => Ok(()),
        }
    }

    /// Patch that overwrites every field with the values of `product`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            number: Some(product.number.clone()),
            description: Some(product.description.clone()),
            images: Some(product.images.clone()),
        }
    }
}

/// Check whether `url` is a well-formed absolute URL.
pub fn is_valid_url(url: &str) -> bool {
    url::Url::parse(url).is_ok()
}

fn validate_images(images: &[ProductImage]) -> Result<()> {
    let mut details = crate::schema::ValidationDetails::default();
    for image in images {
        if !is_valid_url(&image.url) {
            details.push_field_error("images", "Invalid url");
        }
    }
    if details.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationFailed(details))
    }
}
