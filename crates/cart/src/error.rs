//! Unified error handling for the cart crate.
//!
//! Mutations on the store itself never fail: persistence problems are
//! logged and retried on the next write, with the in-memory cart staying
//! the source of truth. `CartError` therefore surfaces in two places only:
//! context handles used after their provider unmounted, and explicit
//! [`flush`](crate::store::CartStore::flush) calls that want to observe a
//! storage failure.

use thiserror::Error;

use crate::storage::StorageError;

/// Application-level error type for cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The storage backend rejected a read, write, or clear.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized for persistence.
    #[error("cart serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A context handle was used after its provider unmounted.
    #[error("cart context used outside an active CartProvider")]
    ScopeClosed,
}

/// Result type alias for [`CartError`].
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::ScopeClosed;
        assert_eq!(
            err.to_string(),
            "cart context used outside an active CartProvider"
        );

        let err = CartError::Storage(StorageError::Backend("disk full".to_string()));
        assert_eq!(err.to_string(), "storage error: storage backend error: disk full");
    }
}
