//! End-to-end tests against a real server on an ephemeral port.

use catalog_client::{
    CatalogClient, DetailView, EditForm, FileBlobStore, ImageField, ListingView, SyncOrchestrator,
    SyncOutcome,
};
use catalog_engine::{
    Catalog, Error, MemoryBlobStore, Product, ProductImage, ProductPatch, ProductsResponse,
    ProductsStore,
};
use catalog_server::config::Config;
use catalog_server::{app, seed, AppState};
use reqwest::Url;

/// Start a server over `catalog` and return a client pointed at it.
async fn spawn_server(catalog: Catalog) -> CatalogClient {
    spawn_router(app(AppState::new(catalog, Config::default()))).await
}

/// Serve `router` on an ephemeral port and return a client pointed at it.
async fn spawn_router(router: axum::Router) -> CatalogClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    CatalogClient::new(Url::parse(&format!("http://{addr}/")).unwrap())
}

async fn seeded() -> CatalogClient {
    spawn_server(Catalog::from_products(seed::builtin_products())).await
}

#[cfg(test)]
mod client_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_products() {
        let client = seeded().await;
        let products = client.get_products().await.unwrap();
        assert_eq!(products, seed::builtin_products());
    }

    #[tokio::test]
    async fn test_get_product_single_and_many() {
        let client = seeded().await;

        let one = client.get_product("singing coach unlimited").await.unwrap();
        assert!(matches!(one, ProductsResponse::One(ref p) if p.number == "b0006se5bq"));

        let many = client.get_product("b00021xhzw").await.unwrap();
        assert!(matches!(many, ProductsResponse::Many(ref list) if list.len() == 2));

        let slash = client.get_product("domino designer/developer v5.0").await.unwrap();
        assert_eq!(slash.len(), 1);
    }

    #[tokio::test]
    async fn test_not_found() {
        let client = seeded().await;
        assert_eq!(
            client.get_product("missing-key").await,
            Err(Error::NotFound("missing-key".into()))
        );
        assert_eq!(
            client
                .patch_product("missing-key", &ProductPatch::new().name("x"))
                .await,
            Err(Error::NotFound("missing-key".into()))
        );
    }

    #[tokio::test]
    async fn test_patch_roundtrip() {
        let client = seeded().await;
        let patch = ProductPatch::new().description("edited");

        let updated = client.patch_product("B0006SE5BQ", &patch).await.unwrap();
        assert_eq!(updated.first().unwrap().description, "edited");

        let fetched = client.get_product("b0006se5bq").await.unwrap();
        assert_eq!(fetched.first().unwrap().description, "edited");
        assert_eq!(fetched.first().unwrap().images.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_patch_is_rejected_locally() {
        let client = seeded().await;
        let patch = ProductPatch::new().images(vec![ProductImage::new("bad url", "x")]);

        assert!(matches!(
            client.patch_product("b0006se5bq", &patch).await,
            Err(Error::ValidationFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_failure() {
        let client = CatalogClient::new(Url::parse("http://127.0.0.1:9/").unwrap());
        assert!(matches!(
            client.get_products().await,
            Err(Error::NetworkFailure(_))
        ));
    }
}

#[cfg(test)]
mod sync_tests {
    use super::*;

    #[tokio::test]
    async fn test_startup_with_empty_catalog_shows_no_products() {
        let client = spawn_server(Catalog::new()).await;
        let mut store = ProductsStore::init(MemoryBlobStore::new());

        assert_eq!(ListingView::from_state(store.state()), ListingView::Loading);

        let outcome = SyncOrchestrator::new(client).run(&mut store).await;

        assert_eq!(outcome, SyncOutcome::Fetched { count: 0 });
        assert!(store.has_synced_once());
        assert_eq!(ListingView::from_state(store.state()), ListingView::Empty);
        assert_eq!(
            ListingView::from_state(store.state()).message(),
            Some("No products.")
        );
    }

    #[tokio::test]
    async fn test_second_session_uses_file_cache() {
        let dir = tempfile::tempdir().unwrap();
        let client = seeded().await;

        let mut first = ProductsStore::init(FileBlobStore::new(dir.path()));
        let outcome = SyncOrchestrator::new(client.clone()).run(&mut first).await;
        assert_eq!(outcome, SyncOutcome::Fetched { count: 3 });

        // The server changes, but the next session shows the cached list.
        client
            .patch_product("b0006se5bq", &ProductPatch::new().description("changed"))
            .await
            .unwrap();

        let mut second = ProductsStore::init(FileBlobStore::new(dir.path()));
        let outcome = SyncOrchestrator::new(client).run(&mut second).await;

        assert_eq!(outcome, SyncOutcome::Cached { count: 3 });
        assert!(second.has_synced_once());
        assert_ne!(second.products()[0].description, "changed");
    }

    #[tokio::test]
    async fn test_failed_startup_fetch_keeps_loading() {
        let client = CatalogClient::new(Url::parse("http://127.0.0.1:9/").unwrap());
        let mut store = ProductsStore::init(MemoryBlobStore::new());

        let outcome = SyncOrchestrator::new(client).run(&mut store).await;

        assert_eq!(outcome, SyncOutcome::FetchFailed);
        assert_eq!(ListingView::from_state(store.state()), ListingView::Loading);
    }
}

#[cfg(test)]
mod edit_tests {
    use super::*;

    async fn opened(client: &CatalogClient, key: &str) -> EditForm {
        let view = DetailView::from_result(client.get_product(key).await);
        EditForm::new(key, view.product().unwrap())
    }

    #[tokio::test]
    async fn test_save_merges_into_store_and_returns_new_number() {
        let client = seeded().await;
        let mut store = ProductsStore::init(MemoryBlobStore::new());
        store.set_products(client.get_products().await.unwrap()).unwrap();

        let mut form = opened(&client, "b0006se5bq").await;
        form.name = "singing coach deluxe".into();
        form.number = "b0006se5bx".into();
        assert!(form.add_image("https://picsum.photos/200", "thumb"));

        let next = form.submit(&client, &mut store).await.unwrap();

        assert_eq!(next, "b0006se5bx");
        assert!(form.submit_error().is_none());
        assert_eq!(store.products().len(), 3);
        assert_eq!(store.products()[0].name, "singing coach deluxe");
        assert_eq!(store.products()[0].images.len(), 3);
        assert!(store.get_by_name("singing coach unlimited").is_none());
    }

    #[tokio::test]
    async fn test_locally_rejected_save_keeps_edits() {
        let client = seeded().await;
        let mut store = ProductsStore::init(MemoryBlobStore::new());

        let mut form = opened(&client, "b0006se5bq").await;
        form.description = "my unsaved edit".into();
        form.update_image(0, ImageField::Url, "definitely not a url");

        let result = form.submit(&client, &mut store).await;

        assert!(matches!(result, Err(Error::ValidationFailed(_))));
        assert!(form.submit_error().unwrap().starts_with("Invalid body"));
        assert_eq!(form.description, "my unsaved edit");
        assert_eq!(form.images()[0].url, "definitely not a url");
        assert!(store.products().is_empty());

        let server_copy = client.get_product("b0006se5bq").await.unwrap();
        assert_ne!(server_copy.first().unwrap().description, "my unsaved edit");
    }

    #[tokio::test]
    async fn test_save_against_duplicate_number_updates_both_rows() {
        let client = seeded().await;
        let mut store = ProductsStore::init(MemoryBlobStore::new());
        store.set_products(client.get_products().await.unwrap()).unwrap();

        let mut form = opened(&client, "b00021xhzw").await;
        form.description = "shared".into();

        form.submit(&client, &mut store).await.unwrap();

        // Every field of the first match is sent, so both records now carry
        // its name; the cache merges both onto the first row with that name.
        let updated: Vec<&Product> = store
            .products()
            .iter()
            .filter(|p| p.description == "shared")
            .collect();
        assert_eq!(updated.len(), 1);
        assert_eq!(store.products().len(), 3);
    }
}

#[cfg(test)]
mod error_mapping_tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Json;
    use serde_json::json;

    /// A server that rejects every patch and fails every list request.
    async fn failing_server() -> CatalogClient {
        let router = axum::Router::new()
            .route(
                "/products",
                get(|| async {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"error": "Catalog unavailable"})),
                    )
                }),
            )
            .route(
                "/products/{key}",
                get(|| async { StatusCode::BAD_GATEWAY }).patch(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(json!({
                            "error": "Invalid body",
                            "details": {
                                "formErrors": [],
                                "fieldErrors": {"number": ["Number already taken"]}
                            }
                        })),
                    )
                }),
            );
        spawn_router(router).await
    }

    #[tokio::test]
    async fn test_bad_request_with_details_is_validation_failure() {
        let client = failing_server().await;

        let result = client
            .patch_product("b0006se5bq", &ProductPatch::new().number("b00021xhzw"))
            .await;

        match result {
            Err(Error::ValidationFailed(details)) => {
                assert_eq!(details.field("number"), ["Number already taken"]);
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_keeps_message_and_status() {
        let client = failing_server().await;

        assert_eq!(
            client.get_products().await,
            Err(Error::NetworkFailure(
                "Catalog unavailable (500 Internal Server Error)".into()
            ))
        );
    }

    #[tokio::test]
    async fn test_error_without_body_falls_back_to_generic_message() {
        let client = failing_server().await;

        assert_eq!(
            client.get_product("b0006se5bq").await,
            Err(Error::NetworkFailure("Request failed (502 Bad Gateway)".into()))
        );
    }

    #[tokio::test]
    async fn test_server_rejection_sets_form_alert() {
        let client = failing_server().await;
        let mut store = ProductsStore::init(MemoryBlobStore::new());
        let product = Product::new("singing coach unlimited", "b0006se5bq", "singing");
        let mut form = EditForm::new("b0006se5bq", &product);
        form.number = "b00021xhzw".into();

        let result = form.submit(&client, &mut store).await;

        assert!(matches!(result, Err(Error::ValidationFailed(_))));
        assert_eq!(
            form.submit_error(),
            Some("Invalid body: number: Number already taken")
        );
        assert_eq!(form.number, "b00021xhzw");
        assert!(store.products().is_empty());
    }
}
