//! # Cart
//!
//! The ordered list of cart lines and its copy-on-write transitions.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Operation              Transition             Failure                 │
//! │  ─────────              ──────────             ───────                 │
//! │                                                                         │
//! │  add (known id) ──────► with_incremented() ──► InsufficientStock       │
//! │                                                                         │
//! │  add (new id) ────────► with_appended() ─────► Duplicate               │
//! │                                                                         │
//! │  remove ──────────────► without() ───────────► NotInCart               │
//! │                                                                         │
//! │  update ──────────────► with_amount() ───────► NotInCart               │
//! │                                                                         │
//! │  NOTE: Every transition borrows `self` and returns a NEW cart.          │
//! │        The original is never touched, so a failed operation leaves      │
//! │        nothing half-applied.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CartItem, CartSummary, ProductId, ProductInfo, StockInfo};
use crate::validation::{check_add_stock, validate_amount, validate_cart_items};

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id
/// - Every line holds at least one unit
/// - Order is first-add order
///
/// Serialized as a bare JSON array of [`CartItem`], which is the persisted
/// blob format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from existing lines, checking the invariants.
    pub fn from_items(items: Vec<CartItem>) -> CoreResult<Self> {
        validate_cart_items(&items)?;
        Ok(Cart { items })
    }

    /// Parses a persisted blob.
    ///
    /// Fails when the text is not a JSON array of cart lines, or when the
    /// lines break the cart invariants.
    pub fn from_json(blob: &str) -> CoreResult<Self> {
        let items: Vec<CartItem> =
            serde_json::from_str(blob).map_err(|e| ValidationError::InvalidFormat {
                field: "cart".to_string(),
                reason: e.to_string(),
            })?;

        Cart::from_items(items)
    }

    /// Serializes the cart into its persisted blob form.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(&self.items).map_err(|e| {
            ValidationError::InvalidFormat {
                field: "cart".to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Lines in first-add order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up the line for a product.
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Returns true if the product has a line in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity of all lines, saturating at `i64::MAX`.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |total, item| total.saturating_add(item.amount))
    }

    /// Counts for badges and status lines.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            line_count: self.len(),
            total_quantity: self.total_quantity(),
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Adds one unit to an existing line, checked against `stock`.
    ///
    /// The line keeps its frozen product fields; only the amount moves.
    pub fn with_incremented(&self, id: ProductId, stock: &StockInfo) -> CoreResult<Cart> {
        let current = self.get(id).ok_or(CoreError::NotInCart(id))?;
        let next_amount = current
            .amount
            .checked_add(1)
            .ok_or(CoreError::InsufficientStock {
                product_id: id,
                available: stock.amount,
                requested: i64::MAX,
            })?;

        check_add_stock(next_amount, stock)?;

        Ok(self.map_line(id, |item| CartItem {
            amount: next_amount,
            ..item.clone()
        }))
    }

    /// Appends a new line holding one unit of `product`.
    ///
    /// The first unit is not stock-checked.
    pub fn with_appended(&self, product: ProductInfo) -> CoreResult<Cart> {
        if self.contains(product.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id.to_string(),
            }
            .into());
        }

        let mut items = self.items.clone();
        items.push(CartItem::from_product(product, 1));
        Ok(Cart { items })
    }

    /// Drops the line for a product.
    pub fn without(&self, id: ProductId) -> CoreResult<Cart> {
        if !self.contains(id) {
            return Err(CoreError::NotInCart(id));
        }

        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        Ok(Cart { items })
    }

    /// Sets the absolute amount of an existing line.
    ///
    /// Stock is not consulted here; callers check it first.
    pub fn with_amount(&self, id: ProductId, amount: i64) -> CoreResult<Cart> {
        validate_amount(amount)?;

        if !self.contains(id) {
            return Err(CoreError::NotInCart(id));
        }

        Ok(self.map_line(id, |item| CartItem {
            amount,
            ..item.clone()
        }))
    }

    fn map_line<F>(&self, id: ProductId, f: F) -> Cart
    where
        F: Fn(&CartItem) -> CartItem,
    {
        let items = self
            .items
            .iter()
            .map(|item| if item.id == id { f(item) } else { item.clone() })
            .collect();
        Cart { items }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
