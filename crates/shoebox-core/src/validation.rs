//! # Validation Module
//!
//! Stock and amount rules for cart mutations.
//!
//! ## Two Stock Boundaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stock = 5                                                              │
//! │                                                                         │
//! │  add (one more unit)      next > stock  → reject                       │
//! │    4 → 5   admitted       (the last unit can be added)                 │
//! │    5 → 6   rejected                                                     │
//! │                                                                         │
//! │  update (absolute amount) amount >= stock → reject                     │
//! │    4       admitted                                                     │
//! │    5       rejected       (one unit of headroom is kept)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both boundaries are the storefront's existing behavior and are kept as-is.

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{CartItem, StockInfo};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Stock Rules
// =============================================================================

/// Checks that a line may grow to `next_amount` units via add.
///
/// Rejects only when `next_amount` is strictly greater than the stock.
pub fn check_add_stock(next_amount: i64, stock: &StockInfo) -> CoreResult<()> {
    if next_amount > stock.amount {
        return Err(CoreError::InsufficientStock {
            product_id: stock.id,
            available: stock.amount,
            requested: next_amount,
        });
    }

    Ok(())
}

/// Checks that a line may be set to `amount` units via update.
///
/// Rejects when `amount` reaches the stock, so the exact boundary
/// `amount == stock` is refused.
pub fn check_update_stock(amount: i64, stock: &StockInfo) -> CoreResult<()> {
    if amount >= stock.amount {
        return Err(CoreError::InsufficientStock {
            product_id: stock.id,
            available: stock.amount,
            requested: amount,
        });
    }

    Ok(())
}

// =============================================================================
// Amount Rules
// =============================================================================

/// Validates a line amount.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_amount(amount: i64) -> ValidationResult<()> {
    if amount <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Rules
// =============================================================================

/// Validates a whole list of cart lines, e.g. one read back from storage.
///
/// ## Rules
/// - Every amount is positive
/// - No product id appears twice
pub fn validate_cart_items(items: &[CartItem]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(items.len());

    for item in items {
        validate_amount(item.amount)?;

        if !seen.insert(item.id) {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: item.id.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
