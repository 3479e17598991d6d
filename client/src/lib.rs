//! # Catalog Client
//!
//! The IO side of the catalog client: an HTTP client for the catalog API, a
//! file-backed blob store for the persisted cache, the startup sync that
//! decides whether to fetch, and the state behind the listing, detail and
//! edit pages.
//!
//! ```no_run
//! use catalog_client::{CatalogClient, ClientConfig, FileBlobStore, ListingView, SyncOrchestrator};
//! use catalog_engine::ProductsStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load()?;
//! let mut store = ProductsStore::init(FileBlobStore::new(config.cache_dir.clone()));
//!
//! let sync = SyncOrchestrator::new(CatalogClient::new(config.api_url.clone()));
//! sync.run(&mut store).await;
//!
//! if let Some(message) = ListingView::from_state(store.state()).message() {
//!     println!("{message}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod edit;
pub mod fs_blob;
pub mod http;
pub mod image;
pub mod sync;
pub mod views;

pub use config::{ClientConfig, ConfigError};
pub use edit::{EditForm, ImageField};
pub use fs_blob::FileBlobStore;
pub use http::CatalogClient;
pub use image::ImageSource;
pub use sync::{CatalogSource, SyncOrchestrator, SyncOutcome};
pub use views::{DetailView, ListingRow, ListingView};
