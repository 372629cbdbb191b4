//! # Sales Service Seam
//!
//! The async trait through which the checkout flow talks to the remote
//! sales API. The embedding application provides the real transport
//! (HTTP client, auth headers, interceptors); tests provide a scripted
//! in-memory implementation.

use async_trait::async_trait;
use thiserror::Error;

use crate::dto::{
    ConfirmPaymentRequest, CreateOrderRequest, CreateOrderResponse, PaymentConfirmation,
    PaymentInit, PaymentRequest,
};

// =============================================================================
// Service Error
// =============================================================================

/// A failed call to the sales API.
///
/// The split matters for messaging only: a rejection carries the
/// server's reason verbatim, a transport failure carries whatever the
/// transport produced. Both are retryable from the checkout flow's
/// point of view; the server is idempotent per order id and per
/// transaction ref.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The server received and rejected the request.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The request may never have reached the server.
    #[error("transport failure: {0}")]
    Transport(String),
}

// =============================================================================
// Sales Service Trait
// =============================================================================

/// The remote sales API, as seen from the POS terminal.
///
/// ## Contract
/// - `create_order` persists a draft order and returns its ids; the
///   order is NOT settled yet
/// - `initiate_payment` settles cash/credit in one round-trip or opens
///   a pending QR transaction
/// - `confirm_payment` settles a pending QR transaction; the same
///   transaction ref may be retried until it succeeds
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Creates a draft order from the cart snapshot.
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<CreateOrderResponse, ServiceError>;

    /// Initiates payment for a created order.
    async fn initiate_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentInit, ServiceError>;

    /// Confirms a pending QR payment after the bank transfer arrived.
    async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
    ) -> Result<PaymentConfirmation, ServiceError>;
}

// =============================================================================
// Unit Tests
// =============================================================================
