//! # Shoebox Configuration
//!
//! Configuration for the inventory client, cart storage and cart policy.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOEBOX_INVENTORY_URL=http://localhost:3333                        │
//! │     SHOEBOX_DB_PATH=/tmp/shoebox.db                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shoebox/shoebox.toml (Linux)                             │
//! │     ~/Library/Application Support/com.shoebox.shoebox/shoebox.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shoebox.toml
//! [inventory]
//! base_url = "http://localhost:3333"
//! timeout_secs = 10
//!
//! [storage]
//! database_path = "/var/lib/shoebox/shoebox.db"
//! cart_key = "@RocketShoes:cart"
//!
//! [cart]
//! discard_corrupt = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shoebox_core::DEFAULT_CART_KEY;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

const CONFIG_FILE_NAME: &str = "shoebox.toml";
const DATABASE_FILE_NAME: &str = "shoebox.db";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "shoebox", "shoebox")
}

// =============================================================================
// Inventory
// =============================================================================

/// Where the inventory service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Base URL; `stock/{id}` and `products/{id}` are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// =============================================================================
// Storage
// =============================================================================

/// Where the cart blob is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Key the cart blob is stored under.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_cart_key() -> String {
    DEFAULT_CART_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            database_path: None,
            cart_key: default_cart_key(),
        }
    }
}

impl StorageConfig {
    /// The configured database path, or the platform default.
    pub fn resolve_database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .ok_or_else(|| ConfigError::Invalid("Could not determine app data directory".into()))
    }
}

// =============================================================================
// Cart Policy
// =============================================================================

/// Cart behavior switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Start with an empty cart when the stored blob is unreadable, instead
    /// of failing initialization.
    #[serde(default)]
    pub discard_corrupt: bool,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete Shoebox configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoeboxConfig {
    #[serde(default)]
    pub inventory: InventoryConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub cart: CartConfig,
}

impl ShoeboxConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform config dir)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the platform default may not.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                info!(?path, "Loading config from file");
                Self::from_file(path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    info!(?path, "Loading config from file");
                    Self::from_file(&path)?
                }
                path => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = &self.inventory.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "Inventory URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.inventory.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.cart_key.trim().is_empty() {
            return Err(ConfigError::Invalid("cart_key must not be empty".into()));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`ShoeboxConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SHOEBOX_INVENTORY_URL") {
            debug!(url = %url, "Overriding inventory URL from environment");
            self.inventory.base_url = url;
        }

        if let Some(timeout) = lookup("SHOEBOX_INVENTORY_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.inventory.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid inventory timeout"),
            }
        }

        if let Some(path) = lookup("SHOEBOX_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("SHOEBOX_CART_KEY") {
            self.storage.cart_key = key;
        }

        if let Some(flag) = lookup("SHOEBOX_DISCARD_CORRUPT") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.cart.discard_corrupt = true,
                "0" | "false" | "no" => self.cart.discard_corrupt = false,
                _ => warn!(value = %flag, "Ignoring invalid SHOEBOX_DISCARD_CORRUPT"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
