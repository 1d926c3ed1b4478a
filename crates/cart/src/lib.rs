//! GoMarket Cart - Client-side cart state management.
//!
//! This crate holds the in-memory cart for a UI session, persists it to a
//! local key-value store, and exposes add/increment/decrement operations to
//! view code through an explicit provider/context pair.
//!
//! # Architecture
//!
//! - [`store::CartStore`] owns the item list and writes the full cart back
//!   to storage after every mutation
//! - [`storage::CartStorage`] is the persistence boundary; a mutex-guarded
//!   in-memory map and a JSON-file backend ship in this crate
//! - [`provider::CartProvider`] scopes the store to a mounted UI tree and
//!   hands out cheap [`provider::CartContext`] handles
//!
//! # Lifecycle
//!
//! The cart starts empty, hydrates once from the blob under the configured
//! storage key (consuming it - the backend is cleared after the read), and
//! from then on the in-memory list is the source of truth for the session.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gomarket_cart::provider::CartProvider;
//! use gomarket_cart::storage::MemoryStorage;
//! use gomarket_core::{CartItemInput, Price, ProductId};
//!
//! # async fn run() {
//! let storage = Arc::new(MemoryStorage::new());
//! let provider = CartProvider::mount(storage, "@GoMarket:cart").await;
//! let cart = provider.context();
//!
//! cart.add_to_cart(CartItemInput {
//!     id: ProductId::new("sku-1"),
//!     title: "Espresso Beans".to_string(),
//!     image_url: "https://cdn.example.com/beans.jpg".to_string(),
//!     price: Price::new(rust_decimal::Decimal::new(1050, 2)),
//! })
//! .await
//! .expect("provider is still mounted");
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod provider;
pub mod storage;
pub mod store;

pub use config::CartConfig;
pub use error::{CartError, Result};
pub use provider::{CartContext, CartProvider};
pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
