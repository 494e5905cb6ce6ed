//! # shoebox-core: Pure Cart Rules
//!
//! This crate is the **heart** of Shoebox. It holds the cart data model and
//! every rule that decides whether a cart mutation is admitted, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Shoebox Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Consumer (CLI, UI renderer)                      │   │
//! │  │        add_product, remove_product, update_product_amount       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          shoebox-cart (Cart Store + collaborators)              │   │
//! │  │    inventory lookups ─► rule checks ─► swap ─► persist          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ shoebox-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   cart    │  │ validation│                  │   │
//! │  │   │ CartItem  │  │   Cart    │  │ stock and │                  │   │
//! │  │   │ StockInfo │  │ snapshots │  │ amount    │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, stock and line item types
//! - [`cart`] - The copy-on-write [`Cart`] and its transitions
//! - [`validation`] - Stock and amount rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shoebox_core::{Cart, ProductId, ProductInfo, StockInfo};
//!
//! let sneaker = ProductInfo {
//!     id: ProductId(1),
//!     title: "Running Sneaker".to_string(),
//!     price: 179.9,
//!     image: "https://example.com/sneaker.jpg".to_string(),
//! };
//!
//! let cart = Cart::new().with_appended(sneaker).unwrap();
//! let cart = cart
//!     .with_incremented(ProductId(1), &StockInfo::new(ProductId(1), 5))
//!     .unwrap();
//!
//! assert_eq!(cart.get(ProductId(1)).map(|item| item.amount), Some(2));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart blob lives under unless configured otherwise.
///
/// Kept identical to the key existing storefront clients already write, so a
/// cart saved by one survives being read by another.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";
