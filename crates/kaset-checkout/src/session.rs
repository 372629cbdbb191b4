//! # Checkout Session
//!
//! The explicit state machine that drives one checkout attempt.
//!
//! ## State Diagram
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout State Machine                             │
//! │                                                                         │
//! │   Idle ──start──► AwaitingOrderCreation ──► AwaitingPaymentInit         │
//! │    │                     │                        │                     │
//! │    │ (EmptyCart,         │ create_order      initiate_payment           │
//! │    │  guard errors       │ failed                 │                     │
//! │    │  keep Idle)         ▼                        ├── cash/credit ──┐   │
//! │    │              Failed{OrderCreation}           │                 ▼   │
//! │    │                     ▲      ▲                 │             Completed
//! │    │                     │      │                 ├── qr ──► AwaitingQrScan
//! │    └──── retry: start ───┘      │                 ▼               │     │
//! │                          Failed{PaymentInit}◄─ failed      confirm_qr   │
//! │                                 │                                 │     │
//! │                                 └──── retry: start ──────┐  ok ──┴──► Completed
//! │                                    (order id kept,       │  err: stay  │
//! │                                     order NOT recreated) │  AwaitingQrScan
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One session covers one sale. The cart is cleared exactly once, on
//! the transition into `Completed`, and never on a failed attempt.
//!
//! ## Concurrency
//! Both triggers take `&mut self`, so a session can never have two
//! calls in flight: a double-tapped checkout button either waits on the
//! session lock and then gets `InvalidTransition`, or is rejected by
//! the state check outright. The in-flight states exist so observers
//! polling [`CheckoutSession::state`] see what the session is doing.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};
use ts_rs::TS;

use kaset_core::cart::Cart;
use kaset_core::money::Money;
use kaset_core::types::PaymentMethod;

use crate::dto::{
    ConfirmPaymentRequest, CreateOrderRequest, PaymentConfirmation, PaymentInit, PaymentRequest,
    QrTicket,
};
use crate::error::{CheckoutError, CheckoutResult};
use crate::service::SalesService;

// =============================================================================
// Tender
// =============================================================================

/// The cashier's chosen way to settle, with its local inputs.
///
/// This is the client-side shape; on the wire it splits into a
/// [`PaymentMethod`] plus an optional paid amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tender {
    /// Cash over the counter, with the amount the customer handed over.
    Cash { tendered: Money },
    /// PromptPay QR, settled out-of-band and confirmed manually.
    QrPromptPay,
    /// Charged to the attached customer's store credit.
    Credit,
}

impl Tender {
    /// The wire-level payment method.
    pub fn method(&self) -> PaymentMethod {
        match self {
            Tender::Cash { .. } => PaymentMethod::Cash,
            Tender::QrPromptPay => PaymentMethod::QrPromptPay,
            Tender::Credit => PaymentMethod::Credit,
        }
    }

    /// The paid amount field of the payment request (cash only).
    pub fn paid_amount(&self) -> Option<Money> {
        match self {
            Tender::Cash { tendered } => Some(*tendered),
            _ => None,
        }
    }
}

// =============================================================================
// Checkout State
// =============================================================================

/// Which step of the flow failed, kept on the `Failed` state so the
/// terminal can word the retry prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStage {
    OrderCreation,
    PaymentInit,
}

/// The state of one checkout attempt.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    /// Nothing submitted yet.
    Idle,
    /// `create_order` is in flight.
    AwaitingOrderCreation,
    /// `initiate_payment` is in flight.
    AwaitingPaymentInit,
    /// A QR ticket is on screen, waiting for the customer's transfer
    /// and the cashier's confirmation.
    AwaitingQrScan { ticket: QrTicket },
    /// Terminal. The cart has been cleared; start a new session for
    /// the next sale.
    Completed,
    /// A remote call failed. Retryable: `start` may fire again and the
    /// session reuses whatever ids it already holds.
    Failed { stage: CheckoutStage },
}

impl CheckoutState {
    /// Short state name for errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::AwaitingOrderCreation => "awaiting_order_creation",
            CheckoutState::AwaitingPaymentInit => "awaiting_payment_init",
            CheckoutState::AwaitingQrScan { .. } => "awaiting_qr_scan",
            CheckoutState::Completed => "completed",
            CheckoutState::Failed { .. } => "failed",
        }
    }
}

// =============================================================================
// Checkout Session
// =============================================================================

/// One checkout attempt over one cart.
///
/// Created when the cashier opens the payment modal, discarded when the
/// modal closes. Abandoning a session needs no client-side cleanup; the
/// server expires unpaid orders on its own schedule.
///
/// There is no built-in timeout on a pending QR ticket. The session
/// records its [`created_at`](CheckoutSession::created_at) time and
/// exposes [`age`](CheckoutSession::age) so the terminal can impose a
/// bounded wait and discard the session when it runs out.
#[derive(Debug)]
pub struct CheckoutSession {
    state: CheckoutState,
    tender: Option<Tender>,
    order_id: Option<String>,
    order_number: Option<String>,
    change: Option<Money>,
    created_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        CheckoutSession {
            state: CheckoutState::Idle,
            tender: None,
            order_id: None,
            order_number: None,
            change: None,
            created_at: Utc::now(),
        }
    }

    // -------------------------------------------------------------------------
    // Triggers
    // -------------------------------------------------------------------------

    /// Runs the checkout flow up to settlement or a pending QR ticket.
    ///
    /// Allowed from `Idle` and from `Failed` (retry). Validation errors
    /// leave the state untouched; remote failures move to `Failed` with
    /// all obtained ids kept, so retrying never duplicates an order.
    ///
    /// On success the state is either `Completed` (cash/credit, cart
    /// cleared) or `AwaitingQrScan` (QR, cart kept until confirmation).
    pub async fn start<S: SalesService>(
        &mut self,
        cart: &mut Cart,
        service: &S,
        tender: Tender,
    ) -> CheckoutResult<&CheckoutState> {
        match self.state {
            CheckoutState::Idle | CheckoutState::Failed { .. } => {}
            _ => return Err(self.invalid_trigger("start")),
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // Local tender guards run before anything touches the network.
        let required = cart.grand_total();
        match tender {
            Tender::Cash { tendered } if tendered < required => {
                return Err(CheckoutError::InsufficientCash { required, tendered });
            }
            Tender::Credit if cart.customer().is_none() => {
                return Err(CheckoutError::NoCustomerForCredit);
            }
            _ => {}
        }

        let payment_method = tender.method();
        let paid_amount = tender.paid_amount();
        self.tender = Some(tender);

        // An order id held from a failed attempt is reused as-is; the
        // server must never see the same sale twice.
        let order_id = match self.order_id.clone() {
            Some(id) => id,
            None => {
                self.state = CheckoutState::AwaitingOrderCreation;
                let request = CreateOrderRequest::from_cart(cart);
                debug!(lines = request.items.len(), total = %required, "creating order");

                match service.create_order(&request).await {
                    Ok(response) => {
                        info!(
                            order_id = %response.order_id,
                            order_number = %response.order_number,
                            "order created"
                        );
                        self.order_number = Some(response.order_number);
                        self.order_id = Some(response.order_id.clone());
                        response.order_id
                    }
                    Err(err) => {
                        warn!(error = %err, "order creation failed");
                        self.state = CheckoutState::Failed {
                            stage: CheckoutStage::OrderCreation,
                        };
                        return Err(CheckoutError::OrderCreationFailed(err));
                    }
                }
            }
        };

        self.state = CheckoutState::AwaitingPaymentInit;
        let request = PaymentRequest {
            order_id,
            payment_method,
            paid_amount,
        };
        debug!(method = ?payment_method, "initiating payment");

        match service.initiate_payment(&request).await {
            Ok(PaymentInit::Confirmed {
                transaction_ref,
                change,
            }) => {
                info!(%transaction_ref, change = %change, "payment settled");
                self.change = Some(change);
                cart.clear();
                self.state = CheckoutState::Completed;
            }
            Ok(PaymentInit::Pending { ticket }) => {
                info!(
                    transaction_ref = %ticket.transaction_ref,
                    amount = %ticket.amount,
                    "qr ticket issued"
                );
                self.state = CheckoutState::AwaitingQrScan { ticket };
            }
            Err(err) => {
                warn!(error = %err, "payment initiation failed");
                self.state = CheckoutState::Failed {
                    stage: CheckoutStage::PaymentInit,
                };
                return Err(CheckoutError::PaymentInitiationFailed(err));
            }
        }

        Ok(&self.state)
    }

    /// Confirms a pending QR payment after the transfer arrived.
    ///
    /// Allowed from `AwaitingQrScan` only. On failure the state does
    /// not move: the ticket and its transaction ref stay valid and the
    /// cashier may confirm again as many times as needed.
    pub async fn confirm_qr<S: SalesService>(
        &mut self,
        cart: &mut Cart,
        service: &S,
        bank_reference: Option<String>,
    ) -> CheckoutResult<PaymentConfirmation> {
        let transaction_ref = match &self.state {
            CheckoutState::AwaitingQrScan { ticket } => ticket.transaction_ref.clone(),
            _ => return Err(self.invalid_trigger("confirm")),
        };

        let request = ConfirmPaymentRequest {
            transaction_ref,
            bank_reference,
        };
        debug!(transaction_ref = %request.transaction_ref, "confirming qr payment");

        match service.confirm_payment(&request).await {
            Ok(confirmation) => {
                info!(
                    order_number = %confirmation.order_number,
                    amount = %confirmation.amount,
                    "payment confirmed"
                );
                cart.clear();
                self.state = CheckoutState::Completed;
                Ok(confirmation)
            }
            Err(err) => {
                warn!(error = %err, "payment confirmation failed, ticket still valid");
                Err(CheckoutError::PaymentConfirmationFailed(err))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current state of the flow.
    #[inline]
    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Chosen tender, once `start` has validated it.
    #[inline]
    pub fn tender(&self) -> Option<Tender> {
        self.tender
    }

    /// Server-issued order id, once order creation succeeded.
    pub fn order_id(&self) -> Option<&str> {
        self.order_id.as_deref()
    }

    /// Human-readable order number for the receipt.
    pub fn order_number(&self) -> Option<&str> {
        self.order_number.as_deref()
    }

    /// Change due back to the customer on a settled cash payment.
    #[inline]
    pub fn change(&self) -> Option<Money> {
        self.change
    }

    /// The pending QR ticket, while waiting for confirmation.
    pub fn qr_ticket(&self) -> Option<&QrTicket> {
        match &self.state {
            CheckoutState::AwaitingQrScan { ticket } => Some(ticket),
            _ => None,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self.state, CheckoutState::Completed)
    }

    /// When this session was created.
    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// How long this session has existed. The terminal uses this to
    /// bound the wait on a QR ticket.
    pub fn age(&self) -> Duration {
        Utc::now() - self.created_at
    }

    fn invalid_trigger(&self, trigger: &'static str) -> CheckoutError {
        CheckoutError::InvalidTransition {
            state: self.state.name(),
            trigger,
        }
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use uuid::Uuid;

    use kaset_core::money::Quantity;
    use kaset_core::types::{CustomerRef, Percent, ProductSnapshot};

    use crate::dto::CreateOrderResponse;
    use crate::service::ServiceError;

    // -------------------------------------------------------------------------
    // Scripted mock service
    // -------------------------------------------------------------------------

    #[derive(Default)]
    struct Recorded {
        create_calls: Vec<CreateOrderRequest>,
        payment_calls: Vec<PaymentRequest>,
        confirm_calls: Vec<ConfirmPaymentRequest>,
        fail_order_creations: usize,
        fail_payment_inits: usize,
        fail_confirmations: usize,
    }

    /// In-memory sales API: records every call, fails the next N calls
    /// per endpoint when scripted to, then succeeds.
    struct MockService {
        total: Money,
        recorded: Mutex<Recorded>,
    }

    impl MockService {
        fn new(total: Money) -> Self {
            MockService {
                total,
                recorded: Mutex::new(Recorded::default()),
            }
        }

        fn fail_next_order_creations(self, n: usize) -> Self {
            self.recorded.lock().unwrap().fail_order_creations = n;
            self
        }

        fn fail_next_payment_inits(self, n: usize) -> Self {
            self.recorded.lock().unwrap().fail_payment_inits = n;
            self
        }

        fn fail_next_confirmations(self, n: usize) -> Self {
            self.recorded.lock().unwrap().fail_confirmations = n;
            self
        }

        fn with_recorded<R>(&self, f: impl FnOnce(&Recorded) -> R) -> R {
            f(&self.recorded.lock().unwrap())
        }

        fn calls(&self) -> (usize, usize, usize) {
            self.with_recorded(|r| {
                (
                    r.create_calls.len(),
                    r.payment_calls.len(),
                    r.confirm_calls.len(),
                )
            })
        }
    }

    #[async_trait]
    impl SalesService for MockService {
        async fn create_order(
            &self,
            request: &CreateOrderRequest,
        ) -> Result<CreateOrderResponse, ServiceError> {
            let mut recorded = self.recorded.lock().unwrap();
            recorded.create_calls.push(request.clone());

            if recorded.fail_order_creations > 0 {
                recorded.fail_order_creations -= 1;
                return Err(ServiceError::Transport("connection reset".to_string()));
            }

            Ok(CreateOrderResponse {
                order_id: Uuid::new_v4().to_string(),
                order_number: format!("SO2026{:04}", recorded.create_calls.len()),
                total: self.total,
            })
        }

        async fn initiate_payment(
            &self,
            request: &PaymentRequest,
        ) -> Result<PaymentInit, ServiceError> {
            let mut recorded = self.recorded.lock().unwrap();
            recorded.payment_calls.push(request.clone());

            if recorded.fail_payment_inits > 0 {
                recorded.fail_payment_inits -= 1;
                return Err(ServiceError::Transport("connection reset".to_string()));
            }

            let transaction_ref = format!("TX{}", Uuid::new_v4().simple());
            Ok(match request.payment_method {
                PaymentMethod::Cash => PaymentInit::Confirmed {
                    transaction_ref,
                    change: request.paid_amount.unwrap_or(self.total) - self.total,
                },
                PaymentMethod::Credit => PaymentInit::Confirmed {
                    transaction_ref,
                    change: Money::zero(),
                },
                PaymentMethod::QrPromptPay => PaymentInit::Pending {
                    ticket: QrTicket {
                        transaction_ref,
                        amount: self.total,
                        qr_data: "00020101021229370016A000000677010111".to_string(),
                        qr_image: "iVBORw0KGgo=".to_string(),
                    },
                },
            })
        }

        async fn confirm_payment(
            &self,
            request: &ConfirmPaymentRequest,
        ) -> Result<PaymentConfirmation, ServiceError> {
            let mut recorded = self.recorded.lock().unwrap();
            recorded.confirm_calls.push(request.clone());

            if recorded.fail_confirmations > 0 {
                recorded.fail_confirmations -= 1;
                return Err(ServiceError::Transport("connection reset".to_string()));
            }

            Ok(PaymentConfirmation {
                order_number: "SO20260001".to_string(),
                amount: self.total,
            })
        }
    }

    // -------------------------------------------------------------------------
    // Fixtures
    // -------------------------------------------------------------------------

    fn product(id: &str, price_satang: i64) -> ProductSnapshot {
        ProductSnapshot {
            id: id.to_string(),
            code: format!("SKU-{}", id),
            name: format!("Product {}", id),
            unit: "ชิ้น".to_string(),
            price: Money::from_satang(price_satang),
            tax_rate: Percent::from_bps(700),
        }
    }

    fn customer() -> CustomerRef {
        CustomerRef {
            id: "c-1".to_string(),
            code: "CUST-0001".to_string(),
            name: "สมชาย".to_string(),
        }
    }

    /// Two lines and a 5% order discount; grand total ฿234.60.
    fn filled_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(product("p-1", 10_000), Quantity::from_units(2)).unwrap();
        cart.update_discount("p-1", Percent::from_bps(1_000)).unwrap();
        cart.add_item(product("p-2", 5_000), Quantity::from_units(1)).unwrap();
        cart.set_order_discount(Percent::from_bps(500)).unwrap();
        assert_eq!(cart.grand_total(), Money::from_satang(23_460));
        cart
    }

    const TOTAL: Money = Money::from_satang(23_460);

    // -------------------------------------------------------------------------
    // Guard tests
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_start_on_empty_cart_stays_idle() {
        let service = MockService::new(TOTAL);
        let mut cart = Cart::new();
        let mut session = CheckoutSession::new();

        let err = session
            .start(&mut cart, &service, Tender::QrPromptPay)
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::EmptyCart);
        assert_eq!(*session.state(), CheckoutState::Idle);
        assert_eq!(service.calls(), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_insufficient_cash_fails_before_any_call() {
        let service = MockService::new(TOTAL);
        let mut cart = filled_cart();
        let mut session = CheckoutSession::new();

        let err = session
            .start(
                &mut cart,
                &service,
                Tender::Cash {
                    tendered: Money::from_satang(20_000),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CheckoutError::InsufficientCash {
                required: TOTAL,
                tendered: Money::from_satang(20_000),
            }
        );
        assert!(!err.is_retryable());
        assert_eq!(*session.state(), CheckoutState::Idle);
        assert_eq!(service.calls(), (0, 0, 0));
        assert!(!cart.is_empty());
    }

    #[tokio::test]
    async fn test_credit_without_customer_fails_before_any_call() {
        let service = MockService::new(TOTAL);
        let mut cart = filled_cart();
        let mut session = CheckoutSession::new();

        let err = session
            .start(&mut cart, &service, Tender::Credit)
            .await
            .unwrap_err();

        assert_eq!(err, CheckoutError::NoCustomerForCredit);
        assert_eq!(service.calls(), (0, 0, 0));
    }

    // -------------------------------------------------------------------------
    // Settled tenders
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_cash_checkout_settles_and_clears_cart() {
        let service = MockService::new(TOTAL);
        let mut cart = filled_cart();
        let mut session = CheckoutSession::new();

        session
            .start(
                &mut cart,
                &service,
                Tender::Cash {
                    tendered: Money::from_satang(50_000),
                },
            )
            .await
            .unwrap();

        assert!(session.is_completed());
        assert!(cart.is_empty());
        assert_eq!(session.change(), Some(Money::from_satang(26_540)));
        assert!(session.order_id().is_some());
        assert!(session.order_number().is_some());
        assert_eq!(service.calls(), (1, 1, 0));

        service.with_recorded(|r| {
            assert_eq!(r.payment_calls[0].payment_method, PaymentMethod::Cash);
            assert_eq!(
                r.payment_calls[0].paid_amount,
                Some(Money::from_satang(50_000))
            );
        });
    }

    #[tokio::test]
    async fn test_exact_cash_is_sufficient() {
        let service = MockService::new(TOTAL);
        let mut cart = filled_cart();
        let mut session = CheckoutSession::new();

        session
            .start(&mut cart, &service, Tender::Cash { tendered: TOTAL })
            .await
            .unwrap();

        assert!(session.is_completed());
        assert_eq!(session.change(), Some(Money::zero()));
    }

    #[tokio::test]
    async fn test_credit_checkout_with_customer() {
        let service = MockService::new(TOTAL);
        let mut cart = filled_cart();
        cart.set_customer(Some(customer()));
        cart.set_credit_sale(true);
        let mut session = CheckoutSession::new();

        session
            .start(&mut cart, &service, Tender::Credit)
            .await
            .unwrap();

        assert!(session.is_completed());
        assert!(cart.is_empty());

        service.with_recorded(|r| {
            assert_eq!(r.create_calls[0].customer_id.as_deref(), Some("c-1"));
            assert!(r.create_calls[0].is_credit_sale);
            assert_eq!(r.payment_calls[0].paid_amount, None);
        });
    }

    // -------------------------------------------------------------------------
    // QR flow
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_qr_confirm_retry_clears_cart_only_on_success() {
        let service = MockService::new(TOTAL).fail_next_confirmations(1);
        let mut cart = filled_cart();
        let mut session = CheckoutSession::new();

        session
            .start(&mut cart, &service, Tender::QrPromptPay)
            .await
            .unwrap();

        let ticket = session.qr_ticket().expect("ticket after qr init").clone();
        assert_eq!(ticket.amount, TOTAL);
        assert!(!cart.is_empty(), "cart must survive until confirmation");

        // First confirmation attempt fails; nothing moves.
        let err = session
            .confirm_qr(&mut cart, &service, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::PaymentConfirmationFailed(_)));
        assert!(err.is_retryable());
        assert_eq!(session.qr_ticket(), Some(&ticket));
        assert!(!cart.is_empty());

        // Retry with the same ticket succeeds.
        let confirmation = session
            .confirm_qr(&mut cart, &service, Some("KBANK-778812".to_string()))
            .await
            .unwrap();
        assert_eq!(confirmation.amount, TOTAL);
        assert!(session.is_completed());
        assert!(cart.is_empty());

        service.with_recorded(|r| {
            assert_eq!(r.confirm_calls.len(), 2);
            assert_eq!(
                r.confirm_calls[0].transaction_ref,
                r.confirm_calls[1].transaction_ref
            );
            assert_eq!(r.confirm_calls[0].bank_reference, None);
            assert_eq!(
                r.confirm_calls[1].bank_reference.as_deref(),
                Some("KBANK-778812")
            );
        });
    }

    #[tokio::test]
    async fn test_start_while_awaiting_qr_is_rejected() {
        let service = MockService::new(TOTAL);
        let mut cart = filled_cart();
        let mut session = CheckoutSession::new();

        session
            .start(&mut cart, &service, Tender::QrPromptPay)
            .await
            .unwrap();

        let err = session
            .start(&mut cart, &service, Tender::QrPromptPay)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InvalidTransition {
                state: "awaiting_qr_scan",
                trigger: "start",
            }
        );
        // Still exactly one order, one payment init.
        assert_eq!(service.calls(), (1, 1, 0));
    }

    // -------------------------------------------------------------------------
    // Retry semantics
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_order_creation_failure_then_retry() {
        let service = MockService::new(TOTAL).fail_next_order_creations(1);
        let mut cart = filled_cart();
        let mut session = CheckoutSession::new();

        let err = session
            .start(&mut cart, &service, Tender::QrPromptPay)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::OrderCreationFailed(_)));
        assert!(err.is_retryable());
        assert_eq!(
            *session.state(),
            CheckoutState::Failed {
                stage: CheckoutStage::OrderCreation,
            }
        );
        assert_eq!(session.order_id(), None);

        session
            .start(&mut cart, &service, Tender::QrPromptPay)
            .await
            .unwrap();
        assert!(session.qr_ticket().is_some());
        assert_eq!(service.calls(), (2, 1, 0));
    }

    #[tokio::test]
    async fn test_payment_retry_reuses_order() {
        let service = MockService::new(TOTAL).fail_next_payment_inits(1);
        let mut cart = filled_cart();
        cart.set_customer(Some(customer()));
        let mut session = CheckoutSession::new();

        let err = session
            .start(&mut cart, &service, Tender::Credit)
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::PaymentInitiationFailed(_)));
        assert_eq!(
            *session.state(),
            CheckoutState::Failed {
                stage: CheckoutStage::PaymentInit,
            }
        );
        let order_id = session.order_id().expect("order id kept").to_string();
        assert!(!cart.is_empty(), "cart untouched by a failed attempt");

        // Retry: no second order, same order id on the wire.
        session
            .start(&mut cart, &service, Tender::Credit)
            .await
            .unwrap();
        assert!(session.is_completed());
        assert_eq!(service.calls(), (1, 2, 0));

        service.with_recorded(|r| {
            assert_eq!(r.payment_calls[0].order_id, order_id);
            assert_eq!(r.payment_calls[1].order_id, order_id);
        });
    }

    #[tokio::test]
    async fn test_retry_may_switch_tender() {
        // The cashier falls back to cash after the QR init fails.
        let service = MockService::new(TOTAL).fail_next_payment_inits(1);
        let mut cart = filled_cart();
        let mut session = CheckoutSession::new();

        session
            .start(&mut cart, &service, Tender::QrPromptPay)
            .await
            .unwrap_err();

        session
            .start(
                &mut cart,
                &service,
                Tender::Cash {
                    tendered: Money::from_satang(30_000),
                },
            )
            .await
            .unwrap();

        assert!(session.is_completed());
        service.with_recorded(|r| {
            assert_eq!(r.payment_calls[1].payment_method, PaymentMethod::Cash);
        });
    }

    // -------------------------------------------------------------------------
    // Terminal state
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_completed_session_rejects_further_triggers() {
        let service = MockService::new(TOTAL);
        let mut cart = filled_cart();
        let mut session = CheckoutSession::new();

        session
            .start(&mut cart, &service, Tender::Cash { tendered: TOTAL })
            .await
            .unwrap();
        assert!(session.is_completed());

        cart.add_item(product("p-3", 100), Quantity::from_units(1)).unwrap();

        let err = session
            .start(&mut cart, &service, Tender::Cash { tendered: TOTAL })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InvalidTransition {
                state: "completed",
                trigger: "start",
            }
        );

        let err = session
            .confirm_qr(&mut cart, &service, None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InvalidTransition {
                state: "completed",
                trigger: "confirm",
            }
        );
    }

    #[tokio::test]
    async fn test_confirm_before_qr_is_rejected() {
        let service = MockService::new(TOTAL);
        let mut cart = filled_cart();
        let mut session = CheckoutSession::new();

        let err = session
            .confirm_qr(&mut cart, &service, None)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CheckoutError::InvalidTransition {
                state: "idle",
                trigger: "confirm",
            }
        );
        assert_eq!(service.calls(), (0, 0, 0));
    }
}
