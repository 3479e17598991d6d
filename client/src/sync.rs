//! Startup sync - rehydrate the cache, then fetch only if it is empty.
//!
//! The sequence runs once per session. It is a best-effort background
//! refresh: a failed fetch is logged and swallowed, leaving the cache as
//! rehydration left it, and nothing is retried.

use crate::http::CatalogClient;
use catalog_engine::{error::Result, BlobStore, Product, ProductsStore};
use std::future::Future;

/// Where the full catalog comes from.
pub trait CatalogSource {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>>> + Send;
}

impl CatalogSource for CatalogClient {
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Product>>> + Send {
        self.get_products()
    }
}

/// What a sync run ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The rehydrated cache was non-empty; no fetch was issued
    Cached { count: usize },
    /// The cache was empty and a fetch replaced it
    Fetched { count: usize },
    /// The cache was empty and the fetch failed
    FetchFailed,
}

/// Runs the startup sequence against a [`ProductsStore`].
#[derive(Debug, Clone)]
pub struct SyncOrchestrator<S> {
    source: S,
}

impl<S: CatalogSource> SyncOrchestrator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Rehydrate, then fetch if the cache is still empty.
    ///
    /// Dropping the returned future before it resolves applies nothing
    /// beyond rehydration.
    pub async fn run<B: BlobStore>(&self, store: &mut ProductsStore<B>) -> SyncOutcome {
        self.rehydrate(store);
        self.fetch_if_empty(store).await
    }

    /// Phase one: load persisted products and show them right away if any.
    ///
    /// An unreadable blob is logged and treated as an empty cache.
    pub fn rehydrate<B: BlobStore>(&self, store: &mut ProductsStore<B>) -> usize {
        let count = match store.rehydrate() {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to rehydrate product cache");
                store.products().len()
            }
        };

        if count > 0 {
            store.mark_synced();
        }
        count
    }

    /// Phase two: fetch the full catalog once, only when nothing is cached.
    pub async fn fetch_if_empty<B: BlobStore>(&self, store: &mut ProductsStore<B>) -> SyncOutcome {
        if !store.should_fetch() {
            return SyncOutcome::Cached {
                count: store.products().len(),
            };
        }

        match self.source.fetch_all().await {
            Ok(products) => {
                let count = products.len();
                if let Err(e) = store.set_products(products) {
                    tracing::warn!(error = %e, "Failed to persist fetched products");
                }
                tracing::debug!(count, "Synced product catalog");
                SyncOutcome::Fetched { count }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Background catalog fetch failed");
                SyncOutcome::FetchFailed
            }
        }
    }
}
