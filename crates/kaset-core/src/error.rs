//! # Error Types
//!
//! Domain-specific error types for kaset-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kaset-core errors (this file)                                         │
//! │  └── CartError       - Cart input rejected, raised before any I/O     │
//! │                                                                         │
//! │  kaset-checkout errors (separate crate)                                │
//! │  ├── CheckoutError   - Checkout flow and remote call failures          │
//! │  └── ServiceError    - What the sales API reported                     │
//! │                                                                         │
//! │  Flow: CartError → CheckoutError → terminal front-end                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::money::{Money, Quantity};

// =============================================================================
// Cart Error
// =============================================================================

/// Cart validation errors.
///
/// All of these are raised synchronously, before anything leaves the
/// terminal. None of them is retryable as-is: the cashier has to correct
/// the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity must be positive.
    ///
    /// The UI convention for "decrement below one unit" is to remove
    /// the line, not to push a zero quantity through an update.
    #[error("quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: Quantity },

    /// Discount rate outside the 0-100% domain.
    ///
    /// Rejected rather than clamped so the terminal can surface a
    /// validation message next to the input field.
    #[error("discount must be between 0% and 100%, got {bps} bps")]
    InvalidDiscount { bps: u32 },

    /// Negative unit price.
    #[error("unit price cannot be negative, got {price}")]
    InvalidPrice { price: Money },

    /// An update referenced a product that has no line in the cart.
    #[error("product {product_id} is not in the cart")]
    LineNotFound { product_id: String },

    /// Cart has reached the maximum number of unique lines.
    #[error("cart cannot have more than {max} lines")]
    TooManyLines { max: usize },

    /// A single line would exceed the maximum quantity.
    #[error("quantity {requested} exceeds the per-line maximum of {max}")]
    QuantityTooLarge { requested: Quantity, max: Quantity },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::InvalidQuantity {
            quantity: Quantity::from_milli(-500),
        };
        assert_eq!(err.to_string(), "quantity must be positive, got -0.500");

        let err = CartError::LineNotFound {
            product_id: "abc-123".to_string(),
        };
        assert_eq!(err.to_string(), "product abc-123 is not in the cart");
    }

    #[test]
    fn test_discount_message_carries_bps() {
        let err = CartError::InvalidDiscount { bps: 12_000 };
        assert!(err.to_string().contains("12000"));
    }
}
