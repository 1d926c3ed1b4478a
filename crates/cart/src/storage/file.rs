//! JSON-file storage backend.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{CartStorage, StorageError};

/// File name of the manifest inside a data directory.
const MANIFEST_FILE: &str = "cart-storage.json";

/// Key-value store backed by a single JSON manifest file.
///
/// The manifest is a flat JSON object mapping keys to string values. Every
/// write rewrites the whole file; with one small cart blob per app this is
/// a few hundred bytes, so no incremental format is needed. An internal
/// mutex serializes read-modify-write cycles against the file.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileStorage {
    /// Create a store whose manifest lives at `path`.
    ///
    /// The file is created lazily on first write; a missing file reads as
    /// an empty store.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Create a store using the default manifest name inside `data_dir`.
    #[must_use]
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::new(data_dir.as_ref().join(MANIFEST_FILE))
    }

    /// Path of the manifest file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(StorageError::Io(e)),
        };

        serde_json::from_str(&raw).map_err(|e| {
            StorageError::Backend(format!(
                "manifest {} is not a valid key-value object: {e}",
                self.path.display()
            ))
        })
    }

    async fn save(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }

        let raw = serde_json::to_string(entries)
            .map_err(|e| StorageError::Backend(format!("manifest serialization failed: {e}")))?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl CartStorage for JsonFileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.guard.lock().await;
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.guard.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.guard.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}
