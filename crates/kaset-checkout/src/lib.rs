//! # kaset-checkout: Checkout Orchestration for Kaset POS
//!
//! Drives one sale from a filled cart to a settled payment against the
//! remote sales API.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POS terminal UI ──► CheckoutSession ──► SalesService (trait)           │
//! │                           │                    │                        │
//! │                      kaset-core           HTTP transport                │
//! │                      (Cart, Money)        (embedding app)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`dto`] - Request/response contracts of the sales API
//! - [`service`] - The [`SalesService`] trait and [`ServiceError`]
//! - [`session`] - The [`CheckoutSession`] state machine
//! - [`error`] - [`CheckoutError`] with retryability classification
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use kaset_checkout::{CheckoutSession, Tender};
//! use kaset_core::cart::Cart;
//! use kaset_core::money::Money;
//!
//! # async fn checkout(service: impl kaset_checkout::SalesService) {
//! let mut cart = Cart::new();
//! // ... cashier fills the cart ...
//!
//! let mut session = CheckoutSession::new();
//! let tender = Tender::Cash {
//!     tendered: Money::from_satang(50_000),
//! };
//!
//! match session.start(&mut cart, &service, tender).await {
//!     Ok(state) => println!("now {}", state.name()),
//!     Err(err) if err.is_retryable() => println!("retry: {err}"),
//!     Err(err) => println!("fix input: {err}"),
//! }
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod service;
pub mod session;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dto::{
    ConfirmPaymentRequest, CreateOrderRequest, CreateOrderResponse, OrderItemRequest,
    PaymentConfirmation, PaymentInit, PaymentRequest, QrTicket,
};
pub use error::{CheckoutError, CheckoutResult};
pub use service::{SalesService, ServiceError};
pub use session::{CheckoutSession, CheckoutStage, CheckoutState, Tender};
