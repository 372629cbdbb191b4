//! # Sales API Contracts
//!
//! Request and response shapes of the remote sales API, as consumed by
//! the checkout flow. These are the only shapes that cross the wire;
//! how they get there (HTTP, auth, retries at the transport level) is
//! the embedding application's business.
//!
//! All types are exported to TypeScript so the terminal front-end and
//! this crate can never drift apart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use kaset_core::cart::{Cart, CartLine};
use kaset_core::money::{Money, Quantity};
use kaset_core::types::{PaymentMethod, Percent};

// =============================================================================
// Order Creation
// =============================================================================

/// One line of an order-creation request.
///
/// Carries the cashier's inputs only; the server recomputes and stores
/// the authoritative amounts from these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub discount_percent: Percent,
}

impl From<&CartLine> for OrderItemRequest {
    fn from(line: &CartLine) -> Self {
        OrderItemRequest {
            product_id: line.product_id().to_string(),
            quantity: line.quantity(),
            unit_price: line.unit_price(),
            discount_percent: line.discount(),
        }
    }
}

/// The order-creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateOrderRequest {
    pub customer_id: Option<String>,
    pub items: Vec<OrderItemRequest>,
    /// Order-level discount taken off the subtotal.
    pub discount_percent: Percent,
    pub notes: Option<String>,
    pub is_credit_sale: bool,
}

impl CreateOrderRequest {
    /// Snapshots a cart into an order-creation request.
    ///
    /// The snapshot is taken line by line, so whatever the cashier
    /// negotiated (price overrides, line discounts) goes to the server
    /// exactly as displayed.
    pub fn from_cart(cart: &Cart) -> Self {
        CreateOrderRequest {
            customer_id: cart.customer().map(|c| c.id.clone()),
            items: cart.lines().iter().map(OrderItemRequest::from).collect(),
            discount_percent: cart.order_discount(),
            notes: if cart.notes().is_empty() {
                None
            } else {
                Some(cart.notes().to_string())
            },
            is_credit_sale: cart.is_credit_sale(),
        }
    }
}

/// What the server returns for a created order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateOrderResponse {
    /// Server-issued order id, reused across payment retries.
    pub order_id: String,
    /// Human-readable order number for the receipt, e.g. "SO20260805A3F1".
    pub order_number: String,
    /// The server's authoritative grand total.
    pub total: Money,
}

// =============================================================================
// Payment
// =============================================================================

/// The payment-initiation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentRequest {
    pub order_id: String,
    pub payment_method: PaymentMethod,
    /// Cash only: the amount the customer handed over.
    pub paid_amount: Option<Money>,
}

/// A PromptPay ticket awaiting an out-of-band bank transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QrTicket {
    /// Server-issued reference, quoted on confirmation.
    pub transaction_ref: String,
    /// Amount encoded into the QR code.
    pub amount: Money,
    /// EMVCo QR payload.
    pub qr_data: String,
    /// Rendered QR image (base64 PNG) for the payment modal.
    pub qr_image: String,
}

/// Outcome of payment initiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PaymentInit {
    /// Cash and credit settle in one round-trip.
    Confirmed {
        transaction_ref: String,
        /// Change due back to the customer; zero for credit sales.
        change: Money,
    },
    /// QR payments settle only after manual confirmation.
    Pending { ticket: QrTicket },
}

/// The manual confirmation request for a QR payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfirmPaymentRequest {
    pub transaction_ref: String,
    /// Bank slip reference, when the cashier has one.
    pub bank_reference: Option<String>,
}

/// What the server returns for a confirmed payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentConfirmation {
    pub order_number: String,
    pub amount: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kaset_core::types::{CustomerRef, ProductSnapshot};

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

    #[test]
    fn test_from_cart_preserves_line_inputs() {
        let mut cart = Cart::new();
        cart.add_item(product("p-1", 10_000), Quantity::from_units(2)).unwrap();
        cart.update_discount("p-1", Percent::from_bps(1_000)).unwrap();
        cart.add_item(product("p-2", 5_000), Quantity::from_milli(2_500)).unwrap();
        cart.update_unit_price("p-2", Money::from_satang(4_800)).unwrap();
        cart.set_order_discount(Percent::from_bps(500)).unwrap();

        let request = CreateOrderRequest::from_cart(&cart);

        assert_eq!(request.items.len(), 2);
        for (item, line) in request.items.iter().zip(cart.lines()) {
            assert_eq!(item.product_id, line.product_id());
            assert_eq!(item.quantity, line.quantity());
            assert_eq!(item.unit_price, line.unit_price());
            assert_eq!(item.discount_percent, line.discount());
        }
        assert_eq!(request.discount_percent, Percent::from_bps(500));
        assert_eq!(request.customer_id, None);
        assert!(!request.is_credit_sale);
    }

    #[test]
    fn test_from_cart_customer_and_notes() {
        let mut cart = Cart::new();
        cart.add_item(product("p-1", 100), Quantity::from_units(1)).unwrap();

        // Empty notes travel as absent, not as ""
        let request = CreateOrderRequest::from_cart(&cart);
        assert_eq!(request.notes, None);

        cart.set_customer(Some(CustomerRef {
            id: "c-9".to_string(),
            code: "CUST-0009".to_string(),
            name: "สมหญิง".to_string(),
        }));
        cart.set_credit_sale(true);
        cart.set_notes("ส่งของพรุ่งนี้");

        let request = CreateOrderRequest::from_cart(&cart);
        assert_eq!(request.customer_id.as_deref(), Some("c-9"));
        assert!(request.is_credit_sale);
        assert_eq!(request.notes.as_deref(), Some("ส่งของพรุ่งนี้"));
    }

    #[test]
    fn test_request_wire_shape() {
        let request = PaymentRequest {
            order_id: "o-1".to_string(),
            payment_method: PaymentMethod::QrPromptPay,
            paid_amount: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["payment_method"], "qr_promptpay");
        assert_eq!(json["order_id"], "o-1");

        let request = PaymentRequest {
            order_id: "o-1".to_string(),
            payment_method: PaymentMethod::Cash,
            paid_amount: Some(Money::from_satang(50_000)),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["payment_method"], "cash");
        // Money crosses the wire as bare satang
        assert_eq!(json["paid_amount"], 50_000);
    }

    #[test]
    fn test_payment_init_status_tag() {
        let settled = PaymentInit::Confirmed {
            transaction_ref: "TX1".to_string(),
            change: Money::from_satang(4_000),
        };
        let json = serde_json::to_value(&settled).unwrap();
        assert_eq!(json["status"], "confirmed");

        let pending = PaymentInit::Pending {
            ticket: QrTicket {
                transaction_ref: "TX2".to_string(),
                amount: Money::from_satang(23_460),
                qr_data: "000201...".to_string(),
                qr_image: "iVBOR...".to_string(),
            },
        };
        let json = serde_json::to_value(&pending).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["ticket"]["transaction_ref"], "TX2");
    }
}
