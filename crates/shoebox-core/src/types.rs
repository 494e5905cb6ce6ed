//! # Domain Types
//!
//! Core domain types shared by every Shoebox crate.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductInfo    │   │   StockInfo     │   │   CartItem      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  title          │   │  amount (≥ 0)   │   │  title, price   │       │
//! │  │  price          │   │                 │   │  image          │       │
//! │  │  image          │   │  never cached   │   │  amount (≥ 1)   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │          │                                            ▲                 │
//! │          └──────────── CartItem::from_product ────────┘                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Explicit Schema
//! Every record has a fixed field set. Unknown fields sent by the inventory
//! service or found in an old blob are dropped on deserialization and are
//! never written back to storage.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Product ID
// =============================================================================

/// Identifier of a product in the inventory service.
///
/// Serialized as a bare integer, matching the inventory API and the stored
/// blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

impl std::str::FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ProductId)
    }
}

// =============================================================================
// Product
// =============================================================================

/// Immutable product metadata, fetched only when a product first enters the
/// cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// Inventory identifier.
    pub id: ProductId,

    /// Display title.
    pub title: String,

    /// Unit price as published by the inventory service.
    ///
    /// Carried for display only; the cart performs no price arithmetic.
    pub price: f64,

    /// Product image URL.
    pub image: String,
}

// =============================================================================
// Stock
// =============================================================================

/// Available quantity of a product, as reported by the inventory service.
///
/// Fetched fresh for every validation and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockInfo {
    /// Inventory identifier.
    pub id: ProductId,

    /// Units available.
    pub amount: i64,
}

impl StockInfo {
    /// Creates a stock record.
    pub fn new(id: ProductId, amount: i64) -> Self {
        StockInfo { id, amount }
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One product line in the cart.
///
/// ## Design Notes
/// - Product fields are a frozen copy taken when the line was created. Bumping
///   the amount later never refetches them.
/// - `amount` is always ≥ 1; a line with nothing in it is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,

    /// Units of this product in the cart.
    pub amount: i64,
}

impl CartItem {
    /// Creates a cart line from product metadata and an amount.
    pub fn from_product(product: ProductInfo, amount: i64) -> Self {
        CartItem {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount,
        }
    }
}

// =============================================================================
// Cart Summary
// =============================================================================

/// Counts a header badge or status line displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Distinct products in the cart.
    pub line_count: usize,

    /// Units across all lines.
    pub total_quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
