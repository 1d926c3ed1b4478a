//! The cart store: hydration, mutations, and write-through persistence.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use gomarket_core::{CartItem, CartItemInput, Price, ProductId};

use crate::error::Result;
use crate::storage::CartStorage;

/// In-memory cart for one UI session, persisted as a single JSON blob.
///
/// The item list is the source of truth; storage is best-effort. Mutations
/// are serialized through an internal async mutex held across the in-memory
/// update *and* the persistence write, so writes reach the backend in call
/// order and the blob always reflects the state after the latest completed
/// operation. A failed write is logged, flagged, and implicitly retried by
/// the next mutation (every write carries the full current cart).
pub struct CartStore {
    storage: Arc<dyn CartStorage>,
    key: String,
    items: RwLock<Vec<CartItem>>,
    writer: Mutex<WriteState>,
}

/// State owned by the persistence path, guarded by the writer mutex.
struct WriteState {
    /// Set when the backend has rejected a write since the last success,
    /// meaning the persisted blob lags the in-memory cart.
    dirty: bool,
}

impl CartStore {
    /// Open a store over `storage`, hydrating from the blob under `key`.
    ///
    /// Hydration consumes the persisted state: after the initial read the
    /// backend is cleared unconditionally, whether or not a blob was found.
    /// A missing, unreadable, or malformed blob yields an empty cart - the
    /// failure is logged, never surfaced.
    pub async fn open(storage: Arc<dyn CartStorage>, key: impl Into<String>) -> Self {
        let key = key.into();

        let items = match storage.get(&key).await {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<CartItem>>(&blob) {
                Ok(items) => {
                    debug!(key = %key, count = items.len(), "hydrated cart from storage");
                    items
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "persisted cart blob is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!(key = %key, "no persisted cart, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(key = %key, error = %e, "failed to read persisted cart, starting empty");
                Vec::new()
            }
        };

        // Persisted state is consumed exactly once per load
        if let Err(e) = storage.clear().await {
            warn!(key = %key, error = %e, "failed to clear storage after hydration");
        }

        Self {
            storage,
            key,
            items: RwLock::new(items),
            writer: Mutex::new(WriteState { dirty: false }),
        }
    }

    /// Snapshot of the current item sequence, in insertion order.
    #[must_use]
    pub fn products(&self) -> Vec<CartItem> {
        self.read_items().clone()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.read_items().iter().map(|item| item.quantity).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        let total = self
            .read_items()
            .iter()
            .map(|item| item.line_total().amount())
            .sum();
        Price::new(total)
    }

    /// Add a candidate item to the cart.
    ///
    /// If a line with the same id already exists this behaves exactly like
    /// [`increment`](Self::increment); otherwise the candidate is appended
    /// with quantity 1. Always succeeds.
    #[instrument(skip(self, input), fields(id = %input.id))]
    pub async fn add_to_cart(&self, input: CartItemInput) {
        let mut write = self.writer.lock().await;

        let snapshot = {
            let mut items = self.write_items();
            match items.iter_mut().find(|item| item.id == input.id) {
                Some(existing) => existing.quantity += 1,
                None => items.push(input.into_item(1)),
            }
            items.clone()
        };

        self.persist(&mut write, &snapshot).await;
    }

    /// Increase the quantity of the line with the given id by one.
    ///
    /// A no-op (beyond re-persisting the current state) when no such line
    /// exists.
    #[instrument(skip(self))]
    pub async fn increment(&self, id: &ProductId) {
        let mut write = self.writer.lock().await;

        let snapshot = {
            let mut items = self.write_items();
            if let Some(item) = items.iter_mut().find(|item| item.id == *id) {
                item.quantity += 1;
            }
            items.clone()
        };

        self.persist(&mut write, &snapshot).await;
    }

    /// Decrease the quantity of the line with the given id by one, removing
    /// the line entirely when it reaches zero.
    ///
    /// A no-op (beyond re-persisting the current state) when no such line
    /// exists.
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: &ProductId) {
        let mut write = self.writer.lock().await;

        let snapshot = {
            let mut items = self.write_items();
            if let Some(item) = items.iter_mut().find(|item| item.id == *id) {
                item.quantity = item.quantity.saturating_sub(1);
            }
            items.retain(|item| !(item.id == *id && item.quantity == 0));
            items.clone()
        };

        self.persist(&mut write, &snapshot).await;
    }

    /// Persist the current cart immediately, surfacing any failure.
    ///
    /// Mutations already write through on every call; this exists for
    /// callers that swallowed a logged write failure and want to retry at
    /// a quiet moment (e.g. on app background) with an observable result.
    pub async fn flush(&self) -> Result<()> {
        let mut write = self.writer.lock().await;
        let snapshot = self.products();

        let blob = serde_json::to_string(&snapshot)?;
        self.storage.set(&self.key, &blob).await?;
        write.dirty = false;
        Ok(())
    }

    /// Whether the persisted blob is known to lag the in-memory cart.
    pub async fn is_dirty(&self) -> bool {
        self.writer.lock().await.dirty
    }

    /// Storage key this store persists under.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    async fn persist(&self, write: &mut WriteState, items: &[CartItem]) {
        let blob = match serde_json::to_string(items) {
            Ok(blob) => blob,
            Err(e) => {
                // Unreachable with well-formed items, but never panic here
                warn!(key = %self.key, error = %e, "failed to serialize cart, will retry");
                write.dirty = true;
                return;
            }
        };

        match self.storage.set(&self.key, &blob).await {
            Ok(()) => write.dirty = false,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to persist cart, will retry on next mutation");
                write.dirty = true;
            }
        }
    }

    fn read_items(&self) -> RwLockReadGuard<'_, Vec<CartItem>> {
        // Poisoning is unreachable: no code path panics while holding the lock
        self.items.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_items(&self) -> RwLockWriteGuard<'_, Vec<CartItem>> {
        self.items.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("items", &self.read_items().len())
            .finish_non_exhaustive()
    }
}
