//! Integration tests for cross-session persistence via the file backend.

use std::sync::Arc;

use gomarket_cart::config::CartConfig;
use gomarket_cart::provider::CartProvider;
use gomarket_cart::storage::{CartStorage, JsonFileStorage};
use gomarket_core::ProductId;
use gomarket_integration_tests::{init_test_logging, sample_input};

#[tokio::test]
async fn test_cart_survives_across_sessions() {
    init_test_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let config = CartConfig::default();

    // Session one: mount, shop, unmount
    {
        let storage = Arc::new(JsonFileStorage::in_dir(dir.path()));
        let provider = CartProvider::mount(storage, config.storage_key.clone()).await;
        let cart = provider.context();

        cart.add_to_cart(sample_input("a")).await.expect("mounted");
        cart.add_to_cart(sample_input("a")).await.expect("mounted");
        cart.add_to_cart(sample_input("b")).await.expect("mounted");
        provider.unmount();
    }

    // Session two: a fresh provider over the same data directory hydrates
    // the previous session's cart
    let storage = Arc::new(JsonFileStorage::in_dir(dir.path()));
    let provider = CartProvider::mount(storage, config.storage_key.clone()).await;
    let cart = provider.context();

    let products = cart.products().expect("mounted");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, ProductId::new("a"));
    assert_eq!(products[0].quantity, 2);
    assert_eq!(products[1].id, ProductId::new("b"));
    assert_eq!(products[1].quantity, 1);
}

#[tokio::test]
async fn test_hydration_consumes_the_manifest() {
    init_test_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let key = CartConfig::default().storage_key;

    {
        let storage = Arc::new(JsonFileStorage::in_dir(dir.path()));
        let provider = CartProvider::mount(storage, key.clone()).await;
        provider
            .context()
            .add_to_cart(sample_input("a"))
            .await
            .expect("mounted");
    }

    // Second session consumes the blob on mount; before any mutation the
    // manifest no longer holds it
    let storage = Arc::new(JsonFileStorage::in_dir(dir.path()));
    let provider = CartProvider::mount(Arc::clone(&storage) as Arc<dyn CartStorage>, key.clone()).await;
    assert_eq!(storage.get(&key).await.expect("readable"), None);

    // An abandoned second session therefore leaves nothing behind
    provider.unmount();
    let third = Arc::new(JsonFileStorage::in_dir(dir.path()));
    let revived = CartProvider::mount(third, key).await;
    assert!(revived.context().products().expect("mounted").is_empty());
}

#[tokio::test]
async fn test_corrupt_manifest_starts_an_empty_session() {
    init_test_logging();
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = Arc::new(JsonFileStorage::in_dir(dir.path()));
    tokio::fs::write(storage.path(), "garbage")
        .await
        .expect("writable tempdir");

    let provider = CartProvider::mount(
        Arc::clone(&storage) as Arc<dyn CartStorage>,
        CartConfig::default().storage_key,
    )
    .await;
    let cart = provider.context();

    // Unreadable backend degrades to an empty cart rather than failing mount
    assert!(cart.products().expect("mounted").is_empty());

    // Mutations proceed normally and rewrite a healthy manifest
    cart.add_to_cart(sample_input("a")).await.expect("mounted");
    let blob = storage
        .get(provider.store().storage_key())
        .await
        .expect("manifest is valid again");
    assert!(blob.is_some());
}
