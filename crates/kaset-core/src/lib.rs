//! # kaset-core: Pure Business Logic for Kaset POS
//!
//! This crate is the **heart** of the Kaset POS order engine. It
//! contains all pricing and cart logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Kaset POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 POS Terminal (TypeScript)                       │   │
//! │  │    Product grid ──► Cart panel ──► Payment modal ──► Receipt    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   kaset-checkout                                │   │
//! │  │    CheckoutSession state machine, SalesService contract         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kaset-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │   cart    │  │   │
//! │  │   │ Snapshot  │  │   Money   │  │ compute_  │  │   Cart    │  │   │
//! │  │   │ Customer  │  │ Quantity  │  │   line    │  │ CartLine  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductSnapshot, CustomerRef, Percent, ...)
//! - [`money`] - Money and Quantity fixed-point types (no floating point!)
//! - [`pricing`] - The per-line discount/tax calculator
//! - [`cart`] - The cart aggregate and its derived totals
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input = same output
//! 2. **No I/O**: network, file system and hardware access are FORBIDDEN here
//! 3. **Integer Money**: all monetary values are satang (i64), quantities
//!    are thousandths (i64), to avoid float errors
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kaset_core::cart::Cart;
//! use kaset_core::money::{Money, Quantity};
//! use kaset_core::types::{Percent, ProductSnapshot};
//!
//! let fertilizer = ProductSnapshot {
//!     id: "550e8400-e29b-41d4-a716-446655440000".into(),
//!     code: "FERT-NPK-50".into(),
//!     name: "NPK 15-15-15 50kg".into(),
//!     unit: "กระสอบ".into(),
//!     price: Money::from_satang(85_000), // ฿850.00
//!     tax_rate: Percent::from_bps(700),  // 7% VAT
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(fertilizer, Quantity::from_units(2)).unwrap();
//!
//! // ฿1,700.00 + 7% VAT
//! assert_eq!(cart.grand_total(), Money::from_satang(181_900));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kaset_core::Money` instead of
// `use kaset_core::money::Money`

pub use cart::{Cart, CartLine, CartLineView, CartTotals};
pub use error::{CartError, CartResult};
pub use money::{Money, Quantity};
pub use pricing::{compute_line, LineAmounts};
pub use types::{CustomerRef, PaymentMethod, Percent, ProductSnapshot};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum unique lines allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps order-creation requests a sane
/// size. Can be made configurable per store in future versions.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g. typing 10000 instead of 10).
/// Configurable per store in future versions.
pub const MAX_LINE_QUANTITY: Quantity = Quantity::from_units(9_999);
