//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `STOREFRONT_NAME` - Store name used in the order confirmation (default: Elegance Wardrobe)
//! - `STOREFRONT_DATA_DIR` - Directory of the file-backed store (default: .elegance)
//! - `STOREFRONT_STORAGE_QUOTA` - Largest value in bytes the store accepts (default: unlimited)
//!
//! The browser build does not read the environment and uses
//! [`StorefrontConfig::default`].

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_STORE_NAME: &str = "Elegance Wardrobe";
const DEFAULT_DATA_DIR: &str = ".elegance";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Store name shown to shoppers
    pub store_name: String,
    /// Directory holding persisted values (file-backed store)
    pub data_dir: PathBuf,
    /// Per-value size limit in bytes
    pub storage_quota: Option<usize>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            store_name: DEFAULT_STORE_NAME.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_quota: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_name = lookup("STOREFRONT_NAME")
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_NAME.to_string());

        let data_dir = lookup("STOREFRONT_DATA_DIR")
            .filter(|dir| !dir.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let storage_quota = lookup("STOREFRONT_STORAGE_QUOTA")
            .map(|raw| {
                raw.trim().parse::<usize>().map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "STOREFRONT_STORAGE_QUOTA".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            store_name,
            data_dir,
            storage_quota,
        })
    }

    /// Confirmation shown after a successful checkout.
    #[must_use]
    pub fn order_confirmation(&self) -> String {
        format!(
            "Order placed successfully! Thank you for shopping at {}.",
            self.store_name
        )
    }
}
