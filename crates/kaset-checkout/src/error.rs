//! # Checkout Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Error Categories                           │
//! │                                                                         │
//! │  ┌──────────────────────┐   ┌───────────────────────────────────────┐  │
//! │  │  Local validation    │   │  Remote failures                      │  │
//! │  │  (before any call)   │   │  (retryable, state preserved)         │  │
//! │  │                      │   │                                       │  │
//! │  │  EmptyCart           │   │  OrderCreationFailed                  │  │
//! │  │  InsufficientCash    │   │  PaymentInitiationFailed              │  │
//! │  │  NoCustomerForCredit │   │  PaymentConfirmationFailed            │  │
//! │  │  InvalidTransition   │   │                                       │  │
//! │  └──────────────────────┘   └───────────────────────────────────────┘  │
//! │                                                                         │
//! │  Local errors need corrected cashier input. Remote errors can be        │
//! │  retried as-is: the session keeps the order id and transaction ref     │
//! │  so a retry never duplicates server-side effects.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use kaset_core::money::Money;

use crate::service::ServiceError;

/// Result type alias for checkout operations.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// Checkout flow errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    // =========================================================================
    // Local Validation
    // =========================================================================
    /// Checkout started on a cart with no lines.
    #[error("cannot check out an empty cart")]
    EmptyCart,

    /// The tendered cash does not cover the grand total.
    #[error("insufficient cash: {required} due, {tendered} tendered")]
    InsufficientCash { required: Money, tendered: Money },

    /// Credit was chosen with no customer attached to the cart.
    #[error("credit sale requires a selected customer")]
    NoCustomerForCredit,

    /// A trigger fired in a state that does not accept it.
    ///
    /// Covers double submission, confirming before a QR exists, and
    /// anything after completion.
    #[error("{trigger} is not allowed in the {state} state")]
    InvalidTransition {
        state: &'static str,
        trigger: &'static str,
    },

    // =========================================================================
    // Remote Failures (retryable)
    // =========================================================================
    /// The order-creation call failed; no order id was obtained.
    #[error("order creation failed: {0}")]
    OrderCreationFailed(#[source] ServiceError),

    /// The payment-initiation call failed; the order id is kept and a
    /// retry will not create a second order.
    #[error("payment initiation failed: {0}")]
    PaymentInitiationFailed(#[source] ServiceError),

    /// The QR confirmation call failed; the ticket stays valid and the
    /// same transaction ref can be confirmed again.
    #[error("payment confirmation failed: {0}")]
    PaymentConfirmationFailed(#[source] ServiceError),
}

impl CheckoutError {
    /// Returns true if re-invoking the same trigger can succeed.
    ///
    /// ## Retryable Errors
    /// - Remote failures: the session preserved its ids, the server is
    ///   idempotent per id
    ///
    /// ## Non-Retryable Errors
    /// - Validation errors: the cashier must change something first
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::OrderCreationFailed(_)
                | CheckoutError::PaymentInitiationFailed(_)
                | CheckoutError::PaymentConfirmationFailed(_)
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
