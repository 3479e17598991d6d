//! Snapshot types for persisting and restoring the client cache.
//!
//! Only the product list is persisted. The "synced at least once" flag is
//! derived fresh in every session.

use crate::{error::Result, Error, Product};
use serde::{Deserialize, Serialize};

/// Version of the snapshot format for future compatibility.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 0;

/// Fixed blob key the cache is persisted under.
pub const CACHE_KEY: &str = "bsp-products";

/// The persisted part of the cache state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A point-in-time snapshot of the cache, as stored in the blob store.
///
/// Wire format: `{"state":{"products":[...]},"version":0}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    pub state: PersistedState,
    #[serde(default)]
    pub version: u32,
}

impl CacheSnapshot {
    /// Create a snapshot of `products`.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            state: PersistedState { products },
            version: SNAPSHOT_FORMAT_VERSION,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.state.products
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::InvalidSnapshot(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidSnapshot(e.to_string()))?;

        if snapshot.version > SNAPSHOT_FORMAT_VERSION {
            return Err(Error::InvalidSnapshot(format!(
                "unsupported snapshot format version: {} (max supported: {})",
                snapshot.version, SNAPSHOT_FORMAT_VERSION
            )));
        }

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_format() {
        let snapshot = CacheSnapshot::new(vec![Product::new("a", "1", "d")]);
        let value: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "state": {
                    "products": [{"name": "a", "number": "1", "description": "d", "images": []}]
                },
                "version": 0
            })
        );
    }

    #[test]
    fn json_roundtrip() {
        let snapshot = CacheSnapshot::new(vec![Product::new("a", "1", "d")]);
        let restored = CacheSnapshot::from_json(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(snapshot, restored);
    }

    #[test]
    fn extra_state_fields_are_ignored() {
        let json = r#"{"state":{"products":[],"hasSyncedOnce":true},"version":0}"#;
        let snapshot = CacheSnapshot::from_json(json).unwrap();
        assert!(snapshot.products().is_empty());
    }

    #[test]
    fn rejects_future_version() {
        let json = r#"{"state":{"products":[]},"version":7}"#;
        assert!(matches!(
            CacheSnapshot::from_json(json),
            Err(Error::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            CacheSnapshot::from_json("{not json"),
            Err(Error::InvalidSnapshot(_))
        ));
    }
}
