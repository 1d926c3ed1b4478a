//! Integration tests for GoMarket.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gomarket-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_operations` - Operation sequences and cart invariants
//! - `cart_persistence` - Hydration, write-through, and failure recovery
//! - `cart_file_storage` - Cross-session persistence via the file backend
//!
//! This library holds shared fixtures: sample item builders and a
//! fault-injecting storage backend for exercising the store's
//! log-and-retry persistence path.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use gomarket_cart::storage::{CartStorage, MemoryStorage, StorageError};
use gomarket_core::{CartItem, CartItemInput, Price, ProductId};

/// Storage key used across the integration suites.
pub const TEST_KEY: &str = "@GoMarket:cart";

/// Build an add-to-cart candidate with a deterministic price of $10.00.
#[must_use]
pub fn sample_input(id: &str) -> CartItemInput {
    CartItemInput {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        image_url: format!("https://cdn.example.com/{id}.jpg"),
        price: Price::new(Decimal::new(1000, 2)),
    }
}

/// Build a stored cart line with the given quantity.
#[must_use]
pub fn sample_item(id: &str, quantity: u32) -> CartItem {
    sample_input(id).into_item(quantity)
}

/// Initialize test logging once; safe to call from every test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gomarket_cart=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Storage wrapper that fails writes on demand.
///
/// Reads and clears pass through so hydration works normally; `set` returns
/// a backend error while `fail_writes` is on, letting tests observe the
/// store's dirty flag and lazy retry behavior.
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: AtomicBool,
    write_attempts: AtomicUsize,
}

impl FlakyStorage {
    /// Create a flaky store that starts healthy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle write failures.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `set` calls observed, including failed ones.
    #[must_use]
    pub fn write_attempts(&self) -> usize {
        self.write_attempts.load(Ordering::SeqCst)
    }

    /// Read a key directly from the healthy inner store.
    pub async fn raw_get(&self, key: &str) -> Option<String> {
        self.inner.get(key).await.ok().flatten()
    }
}

#[async_trait]
impl CartStorage for FlakyStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Backend("injected write failure".to_string()));
        }
        self.inner.set(key, value).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.inner.clear().await
    }
}
