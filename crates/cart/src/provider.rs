//! Provider/context pair scoping the cart to a mounted UI tree.
//!
//! View code never reaches for an ambient global: the component that owns
//! the cart constructs a [`CartProvider`] and passes [`CartContext`] handles
//! down explicitly. A context is `Weak`-backed, so once the provider
//! unmounts every outstanding handle fails fast with
//! [`CartError::ScopeClosed`] instead of silently reading empty state.

use std::sync::{Arc, Weak};

use gomarket_core::{CartItem, CartItemInput, ProductId};

use crate::error::{CartError, Result};
use crate::storage::CartStorage;
use crate::store::CartStore;

/// Owns a [`CartStore`] for the lifetime of a UI scope.
///
/// Dropping the provider (or calling [`unmount`](Self::unmount)) ends the
/// scope; the in-memory cart is discarded and only the persisted blob
/// survives into the next session.
#[derive(Debug)]
pub struct CartProvider {
    store: Arc<CartStore>,
}

impl CartProvider {
    /// Mount a provider over `storage`, hydrating the cart from `key`.
    pub async fn mount(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Self {
        Self::new(CartStore::open(storage, key).await)
    }

    /// Mount a provider around an already-opened store.
    #[must_use]
    pub fn new(store: CartStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Direct access to the owned store.
    #[must_use]
    pub fn store(&self) -> &CartStore {
        &self.store
    }

    /// Hand out a context for consumers inside this scope.
    #[must_use]
    pub fn context(&self) -> CartContext {
        CartContext {
            store: Arc::downgrade(&self.store),
        }
    }

    /// Tear the scope down explicitly.
    ///
    /// Equivalent to dropping the provider; spelled out so unmount sites
    /// read as intent rather than as a value going out of scope.
    pub fn unmount(self) {
        drop(self);
    }
}

/// Consumer handle to the cart of an active [`CartProvider`].
///
/// Cheap to clone and pass to view code. Every operation checks the scope
/// first and returns [`CartError::ScopeClosed`] synchronously if the
/// provider is gone.
#[derive(Debug, Clone)]
pub struct CartContext {
    store: Weak<CartStore>,
}

impl CartContext {
    /// Snapshot of the current item sequence.
    pub fn products(&self) -> Result<Vec<CartItem>> {
        Ok(self.store()?.products())
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> Result<u32> {
        Ok(self.store()?.item_count())
    }

    /// Add a candidate item, merging with an existing line by id.
    pub async fn add_to_cart(&self, input: CartItemInput) -> Result<()> {
        self.store()?.add_to_cart(input).await;
        Ok(())
    }

    /// Increase the quantity of the line with the given id by one.
    pub async fn increment(&self, id: &ProductId) -> Result<()> {
        self.store()?.increment(id).await;
        Ok(())
    }

    /// Decrease the quantity of the line with the given id by one, removing
    /// it at zero.
    pub async fn decrement(&self, id: &ProductId) -> Result<()> {
        self.store()?.decrement(id).await;
        Ok(())
    }

    /// Whether the provider behind this context is still mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.store.strong_count() > 0
    }

    fn store(&self) -> Result<Arc<CartStore>> {
        self.store.upgrade().ok_or(CartError::ScopeClosed)
    }
}
