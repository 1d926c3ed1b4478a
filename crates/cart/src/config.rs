//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GOMARKET_CART_KEY` - Storage key for the persisted cart blob
//!   (default: `@GoMarket:cart`)
//! - `GOMARKET_DATA_DIR` - Directory for the file-backed storage manifest
//!   (default: `.gomarket`)

use std::path::PathBuf;

use thiserror::Error;

/// Default storage key for the persisted cart blob.
pub const DEFAULT_CART_KEY: &str = "@GoMarket:cart";

/// Default data directory for file-backed storage.
const DEFAULT_DATA_DIR: &str = ".gomarket";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Storage key the cart blob is persisted under.
    pub storage_key: String,
    /// Directory holding the file-backed storage manifest.
    pub data_dir: PathBuf,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid (the
    /// storage key must be non-empty).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_key = get_env_or_default("GOMARKET_CART_KEY", DEFAULT_CART_KEY);
        validate_storage_key(&storage_key, "GOMARKET_CART_KEY")?;

        let data_dir = PathBuf::from(get_env_or_default("GOMARKET_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self {
            storage_key,
            data_dir,
        })
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a storage key is usable.
fn validate_storage_key(key: &str, var_name: &str) -> Result<(), ConfigError> {
    if key.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "storage key must be non-empty".to_string(),
        ));
    }
    Ok(())
}
