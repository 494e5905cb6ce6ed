//! # Cart Error Types
//!
//! Error types for the Cart Store and its collaborators.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Inventory     │  │    Storage      │  │     Configuration       │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Http           │  │  Db             │  │  Io                     │ │
//! │  │  Status         │  │  CorruptCart    │  │  Parse                  │ │
//! │  │  Malformed      │  │  Encode         │  │  Invalid                │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │  CartFailure (returned by every cart operation)                   │ │
//! │  │                                                                   │ │
//! │  │  OutOfStock ─┐                                                    │ │
//! │  │  Invalid   ──┴─► Validation kind                                  │ │
//! │  │  NotFound  ────► NotFound kind   ─┐  same generic user message   │ │
//! │  │  Transient ────► Transient kind  ─┘  per operation               │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use shoebox_core::{CoreError, ProductId, ValidationError};
use shoebox_db::DbError;
use thiserror::Error;

/// User-facing message for every stock rejection.
pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity is out of stock";

// =============================================================================
// Inventory Errors
// =============================================================================

/// Failures talking to the inventory service.
///
/// The cart does not distinguish "not found" from "server error": every
/// variant is a transient failure from the cart's point of view.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Inventory returned {status} for {url}")]
    Status { status: u16, url: String },

    /// The response body could not be understood.
    #[error("Malformed inventory response: {0}")]
    Malformed(String),

    /// The service could not be reached for another reason.
    #[error("Inventory unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for inventory lookups.
pub type InventoryResult<T> = Result<T, InventoryError>;

// =============================================================================
// Storage Errors
// =============================================================================

/// Failures loading or saving the persisted cart.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing database failed.
    #[error("Storage database error: {0}")]
    Db(#[from] DbError),

    /// The stored blob is not a valid cart.
    #[error("Stored cart under '{key}' is unreadable: {reason}")]
    CorruptCart { key: String, reason: String },

    /// The cart could not be serialized.
    #[error("Failed to encode cart: {0}")]
    Encode(String),

    /// The backend refused the operation.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Failures loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read or written.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be serialized.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config values are out of range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Cart Operations and Failures
// =============================================================================

/// The three cart mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    /// Generic user-facing message when this operation fails for any reason
    /// other than stock.
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartOperation::Add => "Error adding product",
            CartOperation::Remove => "Error removing product",
            CartOperation::UpdateAmount => "Error changing product quantity",
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartOperation::Add => write!(f, "add"),
            CartOperation::Remove => write!(f, "remove"),
            CartOperation::UpdateAmount => write!(f, "update amount"),
        }
    }
}

/// Coarse failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// An expected business rule said no.
    Validation,
    /// The operation targeted a product with no line in the cart.
    NotFound,
    /// The inventory service failed.
    Transient,
}

/// Why a cart operation left the cart unchanged.
#[derive(Debug, Error)]
pub enum CartFailure {
    /// Not enough stock for the requested amount.
    #[error("{operation} rejected: product {product_id} has {available} in stock, {requested} requested")]
    OutOfStock {
        operation: CartOperation,
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// The target product has no line in the cart.
    #[error("{operation} failed: product {product_id} is not in the cart")]
    NotFound {
        operation: CartOperation,
        product_id: ProductId,
    },

    /// A cart rule rejected the input.
    #[error("{operation} rejected: {source}")]
    Invalid {
        operation: CartOperation,
        #[source]
        source: ValidationError,
    },

    /// The inventory service could not answer.
    #[error("{operation} failed: {source}")]
    Transient {
        operation: CartOperation,
        #[source]
        source: InventoryError,
    },
}

impl CartFailure {
    /// Wraps an inventory error raised during `operation`.
    pub fn transient(operation: CartOperation, source: InventoryError) -> Self {
        CartFailure::Transient { operation, source }
    }

    /// Translates a cart rule violation raised during `operation`.
    pub fn from_core(operation: CartOperation, err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            } => CartFailure::OutOfStock {
                operation,
                product_id,
                available,
                requested,
            },
            CoreError::NotInCart(product_id) => CartFailure::NotFound {
                operation,
                product_id,
            },
            CoreError::Validation(source) => CartFailure::Invalid { operation, source },
        }
    }

    /// The operation that failed.
    pub fn operation(&self) -> CartOperation {
        match self {
            CartFailure::OutOfStock { operation, .. }
            | CartFailure::NotFound { operation, .. }
            | CartFailure::Invalid { operation, .. }
            | CartFailure::Transient { operation, .. } => *operation,
        }
    }

    /// Which taxonomy bucket this failure falls in.
    pub fn kind(&self) -> FailureKind {
        match self {
            CartFailure::OutOfStock { .. } | CartFailure::Invalid { .. } => FailureKind::Validation,
            CartFailure::NotFound { .. } => FailureKind::NotFound,
            CartFailure::Transient { .. } => FailureKind::Transient,
        }
    }

    /// The fixed message shown to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            CartFailure::OutOfStock { .. } => OUT_OF_STOCK_MESSAGE,
            other => other.operation().failure_message(),
        }
    }
}

/// Result type alias for cart operations.
pub type CartResult<T> = Result<T, CartFailure>;
