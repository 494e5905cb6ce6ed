//! # shoebox-cart: Cart State Manager
//!
//! The single authoritative cart for the storefront, kept consistent with
//! inventory stock and persisted across sessions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shoebox Components                               │
//! │                                                                         │
//! │  UI / CLI                                                               │
//! │     │   snapshot() / subscribe()                                        │
//! │     ▼                                                                   │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   shoebox-cart (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   CartActions ──► CartStore ──► InventoryClient ──► HTTP        │   │
//! │  │        │              │                                         │   │
//! │  │        ▼              └───────► CartStorage ──► shoebox-db      │   │
//! │  │    Notifier                                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    shoebox-core (pure rules)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The cart store and its three mutations
//! - [`actions`] - Error-free wrapper that notifies the user on failure
//! - [`inventory`] - Inventory service client
//! - [`storage`] - Persisted blob backends
//! - [`notifier`] - User notification sinks
//! - [`config`] - TOML + environment configuration
//! - [`error`] - Error and failure types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shoebox_cart::{CartOptions, CartStore, HttpInventoryClient, MemoryStorage, ShoeboxConfig};
//!
//! let config = ShoeboxConfig::load(None)?;
//! let inventory = Arc::new(HttpInventoryClient::new(&config.inventory)?);
//! let store = CartStore::open(inventory, Arc::new(MemoryStorage::new()), CartOptions::from(&config)).await?;
//!
//! store.add_product(ProductId(1)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod actions;
pub mod config;
pub mod error;
pub mod inventory;
pub mod notifier;
pub mod storage;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use actions::CartActions;
pub use config::{CartConfig, InventoryConfig, ShoeboxConfig, StorageConfig};
pub use error::{
    CartFailure, CartOperation, CartResult, ConfigError, ConfigResult, FailureKind,
    InventoryError, InventoryResult, StorageError, StorageResult, OUT_OF_STOCK_MESSAGE,
};
pub use inventory::{HttpInventoryClient, InventoryClient};
pub use notifier::{ConsoleNotifier, Notifier, RecordingNotifier, TracingNotifier};
pub use storage::{CartStorage, MemoryStorage, SqliteStorage};
pub use store::{CartOptions, CartStore, Outcome};
