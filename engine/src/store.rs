//! Store - the client-side cache of the catalog.
//!
//! The store mirrors server state for optimistic rendering. It holds the
//! product list plus a flag recording whether the list has been synced at
//! least once this session, and writes the list through to a [`BlobStore`]
//! on every change.
//!
//! Startup is an explicit two-phase protocol: [`ProductsStore::rehydrate`]
//! loads whatever was persisted, then [`ProductsStore::should_fetch`] tells the
//! caller whether a full fetch is needed. Construction never reads storage.

use crate::{
    error::Result, BlobStore, CacheSnapshot, Product, ProductsResponse, CACHE_KEY,
};
use serde::{Deserialize, Serialize};

/// In-memory cache state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheState {
    /// Cached products, in server order plus any appended merges
    pub products: Vec<Product>,
    /// True once a fetch completed or a non-empty cache was rehydrated
    pub has_synced_once: bool,
}

impl CacheState {
    /// First product whose name matches, ignoring case.
    pub fn get_by_name(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name_matches(name))
    }

    /// Replace each updated product in place (matched by name, ignoring case)
    /// or append it when nothing matches.
    pub fn merge(&mut self, updated: Vec<Product>) {
        for product in updated {
            match self
                .products
                .iter()
                .position(|p| p.name_matches(&product.name))
            {
                Some(i) => self.products[i] = product,
                None => self.products.push(product),
            }
        }
    }

    /// Replace the first product named `previous_name` with `product`,
    /// falling back to a by-name merge when no such row exists.
    pub fn replace_by_name(&mut self, previous_name: &str, product: Product) {
        match self.products.iter().position(|p| p.name_matches(previous_name)) {
            Some(i) => self.products[i] = product,
            None => self.merge(vec![product]),
        }
    }
}

/// The client cache bound to its persistence.
#[derive(Debug)]
pub struct ProductsStore<B> {
    blob: B,
    key: String,
    state: CacheState,
}

impl<B: BlobStore> ProductsStore<B> {
    /// Create an empty, unsynced store persisting under [`CACHE_KEY`].
    pub fn init(blob: B) -> Self {
        Self::with_key(blob, CACHE_KEY)
    }

    /// Create an empty, unsynced store persisting under `key`.
    pub fn with_key(blob: B, key: impl Into<String>) -> Self {
        Self {
            blob,
            key: key.into(),
            state: CacheState::default(),
        }
    }

    /// The blob key this store persists under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn state(&self) -> &CacheState {
        &self.state
    }

    pub fn products(&self) -> &[Product] {
        &self.state.products
    }

    pub fn has_synced_once(&self) -> bool {
        self.state.has_synced_once
    }

    /// Read and decode the persisted snapshot without applying it.
    pub fn load(&self) -> Result<Option<CacheSnapshot>> {
        match self.blob.get(&self.key)? {
            Some(json) => CacheSnapshot::from_json(&json).map(Some),
            None => Ok(None),
        }
    }

    /// Apply the persisted snapshot, if any, to the in-memory state.
    ///
    /// Leaves the state untouched when nothing is persisted or the blob is
    /// unreadable. Does not change the sync flag. Returns the number of
    /// products now cached.
    pub fn rehydrate(&mut self) -> Result<usize> {
        if let Some(snapshot) = self.load()? {
            self.state.products = snapshot.into_products();
        }
        Ok(self.state.products.len())
    }

    /// A full fetch is needed exactly when the cache is empty.
    pub fn should_fetch(&self) -> bool {
        self.state.products.is_empty()
    }

    /// Record that the cached list may be displayed.
    pub fn mark_synced(&mut self) {
        self.state.has_synced_once = true;
    }

    /// Replace the cached list wholesale and mark the store synced.
    pub fn set_products(&mut self, products: Vec<Product>) -> Result<()> {
        self.state.products = products;
        self.state.has_synced_once = true;
        self.persist()
    }

    /// Merge server-confirmed updates by name. Does not change the sync flag.
    pub fn merge_products(&mut self, updated: impl Into<MergeInput>) -> Result<()> {
        self.state.merge(updated.into().0);
        self.persist()
    }

    /// Store a record the server confirmed under a possibly new name, keeping
    /// the row that was cached as `previous_name`.
    pub fn replace_renamed(&mut self, previous_name: &str, product: Product) -> Result<()> {
        self.state.replace_by_name(previous_name, product);
        self.persist()
    }

    /// First cached product whose name matches, ignoring case.
    pub fn get_by_name(&self, name: &str) -> Option<&Product> {
        self.state.get_by_name(name)
    }

    /// Remove the persisted blob and reset to the initial state.
    pub fn clear(&mut self) -> Result<()> {
        self.state = CacheState::default();
        self.blob.remove(&self.key)
    }

    /// Tear down the store, handing back its blob store.
    pub fn into_blob(self) -> B {
        self.blob
    }

    fn persist(&self) -> Result<()> {
        let snapshot = CacheSnapshot::new(self.state.products.clone());
        self.blob.set(&self.key, &snapshot.to_json()?)
    }
}

/// One or many products to merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeInput(Vec<Product>);

impl From<Product> for MergeInput {
    fn from(product: Product) -> Self {
        Self(vec![product])
    }
}

impl From<Vec<Product>> for MergeInput {
    fn from(products: Vec<Product>) -> Self {
        Self(products)
    }
}

impl From<ProductsResponse> for MergeInput {
    fn from(response: ProductsResponse) -> Self {
        Self(response.into_vec())
    }
}
