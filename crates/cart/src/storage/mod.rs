//! Persistence boundary for cart state.
//!
//! The cart persists itself as a single serialized blob under one fixed
//! key, so the boundary is a minimal async key-value contract rather than
//! a database. Two backends ship here:
//!
//! - [`MemoryStorage`] - mutex-guarded map, for tests and ephemeral use
//! - [`JsonFileStorage`] - one JSON manifest file in a data directory,
//!   the on-device analog of mobile local storage

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Async key-value persistence used by the cart store.
///
/// Values are UTF-8 strings; the cart only ever stores JSON. Implementations
/// must be internally synchronized - the store calls them from behind its
/// own write lock but makes no further guarantees.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove **every** key in the backend, not just the cart's.
    ///
    /// Hydration calls this unconditionally after its initial read, so
    /// anything else sharing the backend is wiped with the consumed cart
    /// blob. Callers co-locating other data must use a separate backend
    /// instance.
    async fn clear(&self) -> Result<(), StorageError>;
}
