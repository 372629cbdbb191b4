//! # Validation Module
//!
//! Input validation at the cart boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Terminal front-end (TypeScript)                              │
//! │  ├── Basic format checks (empty, numeric)                              │
//! │  └── Immediate cashier feedback                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE, called by every cart mutation                   │
//! │  └── Business rule validation, typed CartError                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Sales API (server)                                           │
//! │  └── Authoritative re-validation on order creation                     │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CartError, CartResult};
use crate::money::{Money, Quantity};
use crate::types::Percent;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed `MAX_LINE_QUANTITY`
///
/// ## Example
/// ```rust
/// use kaset_core::money::Quantity;
/// use kaset_core::validation::validate_quantity;
///
/// assert!(validate_quantity(Quantity::from_units(5)).is_ok());
/// assert!(validate_quantity(Quantity::from_milli(500)).is_ok());
/// assert!(validate_quantity(Quantity::zero()).is_err());
/// ```
pub fn validate_quantity(qty: Quantity) -> CartResult<()> {
    if !qty.is_positive() {
        return Err(CartError::InvalidQuantity { quantity: qty });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(CartError::QuantityTooLarge {
            requested: qty,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a discount rate (line-level or order-level).
///
/// ## Rules
/// - Must lie in 0-100%
/// - Out-of-range input is an error, never clamped
pub fn validate_discount(rate: Percent) -> CartResult<()> {
    if !rate.in_range() {
        return Err(CartError::InvalidDiscount { bps: rate.bps() });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (giveaway items)
///
/// ## Example
/// ```rust
/// use kaset_core::money::Money;
/// use kaset_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_satang(1099)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_ok());
/// assert!(validate_unit_price(Money::from_satang(-100)).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> CartResult<()> {
    if price.is_negative() {
        return Err(CartError::InvalidPrice { price });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates cart size before appending a new line.
///
/// ## Rules
/// - Must not exceed `MAX_CART_LINES` unique lines
pub fn validate_cart_size(current_lines: usize) -> CartResult<()> {
    if current_lines >= MAX_CART_LINES {
        return Err(CartError::TooManyLines {
            max: MAX_CART_LINES,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(Quantity::from_units(1)).is_ok());
        assert!(validate_quantity(Quantity::from_milli(1)).is_ok());
        assert!(validate_quantity(MAX_LINE_QUANTITY).is_ok());

        assert!(validate_quantity(Quantity::zero()).is_err());
        assert!(validate_quantity(Quantity::from_units(-1)).is_err());
        assert_eq!(
            validate_quantity(Quantity::from_milli(MAX_LINE_QUANTITY.milli() + 1)),
            Err(CartError::QuantityTooLarge {
                requested: Quantity::from_milli(MAX_LINE_QUANTITY.milli() + 1),
                max: MAX_LINE_QUANTITY,
            })
        );
    }

    #[test]
    fn test_validate_discount() {
        assert!(validate_discount(Percent::zero()).is_ok());
        assert!(validate_discount(Percent::from_bps(10_000)).is_ok());
        assert_eq!(
            validate_discount(Percent::from_bps(10_001)),
            Err(CartError::InvalidDiscount { bps: 10_001 })
        );
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::zero()).is_ok());
        assert!(validate_unit_price(Money::from_satang(1099)).is_ok());
        assert!(validate_unit_price(Money::from_satang(-1)).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_LINES - 1).is_ok());
        assert!(validate_cart_size(MAX_CART_LINES).is_err());
    }
}
