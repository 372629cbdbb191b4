//! # Domain Types
//!
//! Core domain types shared across Kaset POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │ ProductSnapshot  │  │   CustomerRef    │  │  PaymentMethod   │      │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────  │      │
//! │  │  id (UUID)       │  │  id (UUID)       │  │  Cash            │      │
//! │  │  code (business) │  │  code (business) │  │  QrPromptPay     │      │
//! │  │  name, unit      │  │  name            │  │  Credit          │      │
//! │  │  price, tax_rate │  └──────────────────┘  └──────────────────┘      │
//! │  └──────────────────┘                                                   │
//! │                                                                         │
//! │  ┌──────────────────┐                                                   │
//! │  │     Percent      │  825 bps = 8.25%, used for tax AND discounts     │
//! │  └──────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Products and customers carry both a server-issued UUID (`id`, used in
//! API requests) and a human-readable business code (`code`, shown to the
//! cashier and printed on receipts).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Percent
// =============================================================================

/// A rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 700 bps = 7% (Thai VAT), 1000 bps = a 10% line discount
///
/// One type serves both tax rates and discount rates; both live in the
/// 0-100% domain and both are applied with the same rounding rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percent(u32);

impl Percent {
    /// Upper bound of the valid domain: 100% in basis points.
    pub const MAX_BPS: u32 = 10_000;

    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percent(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    ///
    /// ## Example
    /// ```rust
    /// use kaset_core::types::Percent;
    ///
    /// assert_eq!(Percent::from_percent(7.0).bps(), 700);
    /// assert_eq!(Percent::from_percent(8.25).bps(), 825);
    /// ```
    pub fn from_percent(pct: f64) -> Self {
        Percent((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Percent(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the rate lies in the valid 0-100% domain.
    ///
    /// Out-of-range rates are rejected at the cart boundary, never
    /// silently clamped.
    #[inline]
    pub const fn in_range(&self) -> bool {
        self.0 <= Self::MAX_BPS
    }
}

impl Default for Percent {
    fn default() -> Self {
        Percent::zero()
    }
}

// =============================================================================
// Product Snapshot
// =============================================================================

/// A frozen copy of product data, taken the moment the product is added
/// to the cart.
///
/// The catalog is served by the remote API and can change at any time;
/// the cart keeps displaying and pricing exactly what the cashier saw.
/// Lookups, stock and search stay on the server side: this type is the
/// only product shape the order engine knows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSnapshot {
    /// Server-issued identifier (UUID v4).
    pub id: String,

    /// Business code shown to the cashier and on receipts.
    pub code: String,

    /// Display name at the time of adding (frozen).
    pub name: String,

    /// Sales unit label: "กระสอบ" (sack), "ขวด" (bottle), "kg".
    pub unit: String,

    /// Selling price at the time of adding (frozen).
    pub price: Money,

    /// Tax rate at the time of adding (frozen).
    pub tax_rate: Percent,
}

// =============================================================================
// Customer Reference
// =============================================================================

/// A weak reference to a customer: identifier plus display snapshot.
///
/// The cart does not own the customer lifecycle. Credit limits, balances
/// and due dates live on the server; attaching a customer here only
/// routes the order and unlocks the credit tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerRef {
    /// Server-issued identifier (UUID v4).
    pub id: String,

    /// Business code, e.g. "CUST-0042".
    pub code: String,

    /// Display name at the time of selection.
    pub name: String,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale is settled.
///
/// Wire values match the sales API: `cash`, `qr_promptpay`, `credit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash over the counter.
    Cash,
    /// PromptPay QR code, confirmed manually after the bank transfer.
    #[serde(rename = "qr_promptpay")]
    QrPromptPay,
    /// Charged against the customer's store credit.
    Credit,
}

// =============================================================================
// Unit Tests
// =============================================================================
