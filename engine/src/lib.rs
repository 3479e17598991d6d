//! # Catalog Engine
//!
//! Core logic for the product catalog: the server-side record store with its
//! lookup and patch semantics, and the client-side cache that mirrors server
//! state for optimistic rendering.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, or platform
//! - **Deterministic**: Same inputs always produce same outputs
//! - **Testable**: Pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Products
//!
//! A [`Product`] has a `name`, a `number`, a description and an ordered list
//! of [`ProductImage`]s. Names and numbers are case-insensitive lookup keys
//! but are not unique, so every keyed operation works on the set of matches.
//!
//! ### Catalog
//!
//! The [`Catalog`] is the server-side ordered record store. Lookups return
//! every match in catalog order; [`Catalog::update`] applies a
//! [`ProductPatch`] to every match in place. Results are shaped into a
//! [`ProductsResponse`]: a bare product for one match, a list for several.
//!
//! ### Client cache
//!
//! The [`ProductsStore`] holds the cached product list and a "synced at least
//! once" flag, merges server-confirmed edits by name, and persists the list
//! through a [`BlobStore`] as a [`CacheSnapshot`].
//!
//! ## Quick Start
//!
//! ```rust
//! use catalog_engine::{
//!     Catalog, Lookup, MemoryBlobStore, Product, ProductPatch, ProductsResponse, ProductsStore,
//! };
//!
//! // Server side: patch every record matching a key
//! let mut catalog = Catalog::from_products(vec![
//!     Product::new("singing coach unlimited", "b0006se5bq", "electronic learning"),
//! ]);
//! let updated = catalog
//!     .update(&Lookup::any("B0006SE5BQ"), &ProductPatch::new().description("edited"))
//!     .unwrap();
//! let response = ProductsResponse::from_matches(updated).unwrap();
//!
//! // Client side: merge the confirmed update into the cache
//! let mut store = ProductsStore::init(MemoryBlobStore::new());
//! store.set_products(catalog.all().to_vec()).unwrap();
//! store.merge_products(response).unwrap();
//!
//! let cached = store.get_by_name("Singing Coach Unlimited").unwrap();
//! assert_eq!(cached.description, "edited");
//! ```

pub mod blob;
pub mod catalog;
pub mod error;
pub mod product;
pub mod response;
pub mod schema;
pub mod snapshot;
pub mod store;

// Re-export main types at crate root
pub use blob::{BlobStore, MemoryBlobStore};
pub use catalog::{Catalog, Lookup};
pub use error::Error;
pub use product::{keys_match, Product, ProductImage, ProductPatch};
pub use response::ProductsResponse;
pub use schema::{
    patch_schema, product_schema, FieldDef, FieldType, ObjectSchema, ValidationDetails,
};
pub use snapshot::{CacheSnapshot, PersistedState, CACHE_KEY, SNAPSHOT_FORMAT_VERSION};
pub use store::{CacheState, MergeInput, ProductsStore};
