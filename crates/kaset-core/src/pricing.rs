//! # Line Pricing
//!
//! The pure calculator behind every cart line.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  gross    = unit_price × quantity                                       │
//! │  discount = gross × discount_rate                                       │
//! │  taxable  = gross - discount          ← the taxable base                │
//! │  tax      = taxable × tax_rate        ← tax AFTER discount, never on    │
//! │  total    = taxable + tax               the gross amount                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each derived amount is rounded half-up to the satang exactly once,
//! from exact i128 numerators. Nothing is re-rounded: `line_total` is a
//! plain sum of already-rounded parts, so the invariant
//! `line_total = gross - discount + tax` holds to the satang.

use serde::Serialize;
use ts_rs::TS;

use crate::money::{div_round_half_up, Money, Quantity};
use crate::types::Percent;

/// The derived amounts of one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LineAmounts {
    /// Amount taken off by the line discount.
    pub discount_amount: Money,

    /// Discounted, pre-tax base. Line bases sum to the cart subtotal.
    pub taxable_base: Money,

    /// Tax on the taxable base.
    pub tax_amount: Money,

    /// `taxable_base + tax_amount`.
    pub line_total: Money,
}

/// Computes the derived amounts for one line.
///
/// Pure and deterministic: identical inputs always produce identical
/// outputs, which is what makes re-editing a line idempotent.
///
/// Callers guarantee `quantity > 0`, rates within 0-100% and a
/// non-negative unit price; the cart rejects anything else before this
/// function runs.
///
/// ## Example
/// ```rust
/// use kaset_core::money::{Money, Quantity};
/// use kaset_core::pricing::compute_line;
/// use kaset_core::types::Percent;
///
/// // ฿100.00 × 2, 10% discount, 7% VAT
/// let amounts = compute_line(
///     Money::from_satang(10_000),
///     Quantity::from_units(2),
///     Percent::from_bps(1_000),
///     Percent::from_bps(700),
/// );
///
/// assert_eq!(amounts.discount_amount.satang(), 2_000); // ฿20.00
/// assert_eq!(amounts.taxable_base.satang(), 18_000);   // ฿180.00
/// assert_eq!(amounts.tax_amount.satang(), 1_260);      // ฿12.60
/// assert_eq!(amounts.line_total.satang(), 19_260);     // ฿192.60
/// ```
pub fn compute_line(
    unit_price: Money,
    quantity: Quantity,
    discount: Percent,
    tax_rate: Percent,
) -> LineAmounts {
    debug_assert!(quantity.is_positive());
    debug_assert!(discount.in_range());
    debug_assert!(tax_rate.in_range());
    debug_assert!(!unit_price.is_negative());

    // Exact product in satang-thousandths; both rounded fields below
    // derive from this same numerator.
    let gross_num = unit_price.satang() as i128 * quantity.milli() as i128;

    let gross = Money::from_satang(div_round_half_up(gross_num, 1_000));
    let discount_amount = Money::from_satang(div_round_half_up(
        gross_num * discount.bps() as i128,
        1_000 * 10_000,
    ));

    let taxable_base = gross - discount_amount;
    let tax_amount = taxable_base.percent_of(tax_rate);

    LineAmounts {
        discount_amount,
        taxable_base,
        tax_amount,
        line_total: taxable_base + tax_amount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
