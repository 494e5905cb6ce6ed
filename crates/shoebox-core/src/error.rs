//! # Error Types
//!
//! Domain-specific error types for shoebox-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shoebox-core errors (this file)                                       │
//! │  ├── CoreError        - Cart rule violations                           │
//! │  └── ValidationError  - Malformed amounts and blobs                    │
//! │                                                                         │
//! │  shoebox-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  shoebox-cart errors                                                   │
//! │  └── CartFailure      - What the consumer sees (→ notifier message)    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CartFailure → Notifier            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Cart rule violations.
///
/// Returned by the pure transitions on [`crate::Cart`]. None of these leave a
/// partially modified cart behind: transitions build a new cart or fail.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Not enough stock to admit the requested amount.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart holds 2 × product 1, stock says 2
    ///      │
    ///      ▼
    /// add_product(1) → requested 3
    ///      │
    ///      ▼
    /// InsufficientStock { product_id: 1, available: 2, requested: 3 }
    ///      │
    ///      ▼
    /// Notifier: "Requested quantity is out of stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: ProductId,
        available: i64,
        requested: i64,
    },

    /// The operation targets a product that has no line in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input and blob validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., two cart lines for one product).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Invalid format (e.g., a stored blob that is not a cart).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product_id: ProductId(3),
            available: 2,
            requested: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 3: available 2, requested 3"
        );

        let err = CoreError::NotInCart(ProductId(99));
        assert_eq!(err.to_string(), "Product 99 is not in the cart");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: amount must be positive");
    }
}
