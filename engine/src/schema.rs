//! Schema definition and validation.
//!
//! Schemas describe the JSON shape of products and patches so that request
//! bodies and fetched payloads can be checked before they are deserialized or
//! applied. Problems are collected, not short-circuited, into a
//! [`ValidationDetails`] that mirrors a flattened schema error.

use crate::{error::Result, Error};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Flattened validation problems.
///
/// Root-level problems land in `form_errors`; anything under a top-level
/// field (including nested image problems) is listed under that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationDetails {
    #[serde(default)]
    pub form_errors: Vec<String>,
    #[serde(default)]
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl ValidationDetails {
    pub fn push_form_error(&mut self, message: impl Into<String>) {
        self.form_errors.push(message.into());
    }

    pub fn push_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }

    /// Messages recorded for `field`.
    pub fn field(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::ValidationFailed(self))
        }
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.form_errors.clone();
        for (field, messages) in &self.field_errors {
            for message in messages {
                parts.push(format!("{field}: {message}"));
            }
        }
        write!(f, "{}", parts.join("; "))
    }
}

/// Field types supported in schemas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    String,
    /// A string that parses as an absolute URL
    Url,
    /// An array whose elements all match the nested object schema
    List(ObjectSchema),
}

impl FieldType {
    fn expected(&self) -> &'static str {
        match self {
            FieldType::String | FieldType::Url => "string",
            FieldType::List(_) => "array",
        }
    }
}

/// Definition of a field in an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Field name
    pub name: String,
    /// Field type
    pub field_type: FieldType,
    /// Whether this field is required
    pub required: bool,
}

impl FieldDef {
    /// Create a new required field definition.
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
        }
    }

    /// Create a new optional field definition.
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
        }
    }

    /// Check a value (or its absence) against this field definition,
    /// recording problems under `key`.
    ///
    /// An explicit `null` is a type error even for optional fields.
    fn check(&self, value: Option<&Value>, key: &str, details: &mut ValidationDetails) {
        let value = match value {
            None if self.required => {
                details.push_field_error(key, "Required");
                return;
            }
            None => return,
            Some(v) => v,
        };

        match &self.field_type {
            FieldType::String => {
                if !value.is_string() {
                    details.push_field_error(key, type_message("string", value));
                }
            }
            FieldType::Url => match value.as_str() {
                Some(s) if crate::product::is_valid_url(s) => {}
                Some(_) => details.push_field_error(key, "Invalid url"),
                None => details.push_field_error(key, type_message("string", value)),
            },
            FieldType::List(element) => match value.as_array() {
                Some(items) => {
                    for item in items {
                        element.check(item, Some(key), details);
                    }
                }
                None => {
                    details.push_field_error(key, type_message(self.field_type.expected(), value))
                }
            },
        }
    }
}

fn type_message(expected: &str, got: &Value) -> String {
    format!("Expected {}, received {}", expected, json_type_name(got))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Schema for a JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSchema {
    /// Field definitions
    pub fields: Vec<FieldDef>,
}

impl ObjectSchema {
    /// Create a new object schema.
    pub fn new(fields: Vec<FieldDef>) -> Self {
        Self { fields }
    }

    /// The same schema with every top-level field optional.
    pub fn partial(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .cloned()
                .map(|mut f| {
                    f.required = false;
                    f
                })
                .collect(),
        }
    }

    /// Validate a single object. Unknown keys are ignored.
    pub fn validate(&self, value: &Value) -> Result<()> {
        let mut details = ValidationDetails::default();
        self.check(value, None, &mut details);
        details.into_result()
    }

    /// Validate an array of objects. Problems are keyed by element index.
    pub fn validate_list(&self, value: &Value) -> Result<()> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::invalid(type_message("array", value)))?;

        let mut details = ValidationDetails::default();
        for (i, item) in items.iter().enumerate() {
            self.check(item, Some(&i.to_string()), &mut details);
        }
        details.into_result()
    }

    /// Validate either one object or an array of objects.
    pub fn validate_one_or_many(&self, value: &Value) -> Result<()> {
        if value.is_array() {
            self.validate_list(value)
        } else {
            self.validate(value)
        }
    }

    /// Record problems for `value`. When `parent` is set (nested object or
    /// list element) every problem is attributed to that parent key.
    fn check(&self, value: &Value, parent: Option<&str>, details: &mut ValidationDetails) {
        let Some(obj) = value.as_object() else {
            let message = type_message("object", value);
            match parent {
                Some(key) => details.push_field_error(key, message),
                None => details.push_form_error(message),
            }
            return;
        };

        for field in &self.fields {
            let key = parent.unwrap_or(&field.name);
            field.check(obj.get(&field.name), key, details);
        }
    }
}

/// Shape of a product image.
pub fn image_schema() -> ObjectSchema {
    ObjectSchema::new(vec![
        FieldDef::required("url", FieldType::Url),
        FieldDef::required("name", FieldType::String),
    ])
}

/// Shape of a full product.
pub fn product_schema() -> ObjectSchema {
    ObjectSchema::new(vec![
        FieldDef::required("name", FieldType::String),
        FieldDef::required("number", FieldType::String),
        FieldDef::required("description", FieldType::String),
        FieldDef::required("images", FieldType::List(image_schema())),
    ])
}

/// Shape of a patch: the product shape with every field optional.
pub fn patch_schema() -> ObjectSchema {
    product_schema().partial()
}
