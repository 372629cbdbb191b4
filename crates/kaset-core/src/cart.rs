//! # Cart Aggregate
//!
//! The in-memory shopping cart for one POS terminal session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Cashier Action           Cart Operation           State Change         │
//! │  ──────────────           ──────────────           ────────────         │
//! │                                                                         │
//! │  Tap product ────────────► add_item() ───────────► merge or append     │
//! │                                                                         │
//! │  Edit quantity ──────────► update_quantity() ────► line.quantity = q   │
//! │                                                                         │
//! │  Edit line discount ─────► update_discount() ────► line.discount = d   │
//! │                                                                         │
//! │  Haggle price ───────────► update_unit_price() ──► line.unit_price = p │
//! │                                                                         │
//! │  Pick customer ──────────► set_customer() ───────► customer = Some(c)  │
//! │                                                                         │
//! │  Remove line ────────────► remove_item() ────────► lines.retain(..)    │
//! │                                                                         │
//! │  Totals panel ───────────► subtotal()/grand_total() (read only)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id (adding the same product merges
//!   quantities; the line keeps its price override and discount)
//! - Every line quantity is positive
//! - Derived amounts are recomputed from current inputs on every read,
//!   so they can never go stale
//! - All mutations are synchronous and atomic: each one fully applies
//!   before the next begins
//!
//! Totals follow the receipt layout: the order-level discount comes off
//! the sum of discounted pre-tax line bases, while tax stays per line.
//! Whether the order-level discount should also shrink the taxable base
//! is a product question; the arithmetic here matches what the store
//! runs today.

use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::error::{CartError, CartResult};
use crate::money::{Money, Quantity};
use crate::pricing::{compute_line, LineAmounts};
use crate::types::{CustomerRef, Percent, ProductSnapshot};
use crate::validation::{
    validate_cart_size, validate_discount, validate_quantity, validate_unit_price,
};

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the cart.
///
/// Holds a frozen [`ProductSnapshot`] plus the cashier-editable inputs:
/// quantity, unit price (overridable for negotiated prices) and a line
/// discount. Derived amounts come from [`compute_line`] on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: ProductSnapshot,
    quantity: Quantity,
    unit_price: Money,
    discount: Percent,
    added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a line from a product snapshot.
    ///
    /// The unit price starts at the snapshot's selling price and the
    /// discount at zero; both can be edited afterwards.
    fn new(product: ProductSnapshot, quantity: Quantity) -> Self {
        CartLine {
            unit_price: product.price,
            product,
            quantity,
            discount: Percent::zero(),
            added_at: Utc::now(),
        }
    }

    /// The frozen product snapshot.
    #[inline]
    pub fn product(&self) -> &ProductSnapshot {
        &self.product
    }

    /// Shorthand for the product's server id.
    #[inline]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Current unit price (may differ from `product().price`).
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    #[inline]
    pub fn discount(&self) -> Percent {
        self.discount
    }

    /// When this line was first added to the cart.
    #[inline]
    pub fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// All derived amounts, recomputed from current inputs.
    pub fn amounts(&self) -> LineAmounts {
        compute_line(
            self.unit_price,
            self.quantity,
            self.discount,
            self.product.tax_rate,
        )
    }

    /// Amount taken off by the line discount.
    pub fn discount_amount(&self) -> Money {
        self.amounts().discount_amount
    }

    /// Discounted, pre-tax base of this line.
    pub fn taxable_base(&self) -> Money {
        self.amounts().taxable_base
    }

    /// Tax on the discounted base.
    pub fn tax_amount(&self) -> Money {
        self.amounts().tax_amount
    }

    /// Line total including tax.
    pub fn line_total(&self) -> Money {
        self.amounts().line_total
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart aggregate.
///
/// One cart exists per POS terminal session. It is created empty,
/// mutated by the cashier, snapshotted into an order request at
/// checkout, and cleared after a successful payment.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    customer: Option<CustomerRef>,
    order_discount: Percent,
    credit_sale: bool,
    notes: String,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a product to the cart, or merges into its existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: the quantities are added together and
    ///   the line keeps its current unit price and discount
    /// - New product: appends a line at the snapshot's selling price
    ///   with zero discount
    ///
    /// A negative `quantity` is accepted as a merge decrement as long
    /// as the resulting quantity stays positive.
    pub fn add_item(&mut self, product: ProductSnapshot, quantity: Quantity) -> CartResult<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            let merged = line.quantity + quantity;
            validate_quantity(merged)?;
            line.quantity = merged;
            return Ok(());
        }

        validate_quantity(quantity)?;
        validate_cart_size(self.lines.len())?;
        self.lines.push(CartLine::new(product, quantity));
        Ok(())
    }

    /// Removes a line by product id.
    ///
    /// Removing a product that is not in the cart is a documented
    /// no-op, not an error: the cashier may tap remove twice.
    pub fn remove_item(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Replaces the quantity of an existing line.
    ///
    /// A non-positive quantity is rejected; the UI removes the line
    /// instead when decrementing below one unit.
    pub fn update_quantity(&mut self, product_id: &str, quantity: Quantity) -> CartResult<()> {
        validate_quantity(quantity)?;
        self.line_mut(product_id)?.quantity = quantity;
        Ok(())
    }

    /// Replaces the discount rate of an existing line.
    pub fn update_discount(&mut self, product_id: &str, discount: Percent) -> CartResult<()> {
        validate_discount(discount)?;
        self.line_mut(product_id)?.discount = discount;
        Ok(())
    }

    /// Overrides the unit price of an existing line.
    ///
    /// Counter sales are negotiated all the time; the snapshot price
    /// stays untouched so the override remains visible.
    pub fn update_unit_price(&mut self, product_id: &str, price: Money) -> CartResult<()> {
        validate_unit_price(price)?;
        self.line_mut(product_id)?.unit_price = price;
        Ok(())
    }

    /// Attaches or detaches the customer.
    pub fn set_customer(&mut self, customer: Option<CustomerRef>) {
        self.customer = customer;
    }

    /// Sets the order-level discount rate.
    pub fn set_order_discount(&mut self, rate: Percent) -> CartResult<()> {
        validate_discount(rate)?;
        self.order_discount = rate;
        Ok(())
    }

    /// Flags the sale as a credit sale.
    ///
    /// Only meaningful with a customer attached; the checkout flow
    /// enforces that pairing, the cart just records the flag.
    pub fn set_credit_sale(&mut self, credit_sale: bool) {
        self.credit_sale = credit_sale;
    }

    /// Replaces the free-text order notes.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Resets the cart to its initial empty state.
    ///
    /// Clears lines, customer, order discount, credit flag and notes:
    /// the next sale starts from scratch.
    pub fn clear(&mut self) {
        *self = Cart::default();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Lines in insertion order.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by product id.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    #[inline]
    pub fn customer(&self) -> Option<&CustomerRef> {
        self.customer.as_ref()
    }

    #[inline]
    pub fn order_discount(&self) -> Percent {
        self.order_discount
    }

    #[inline]
    pub fn is_credit_sale(&self) -> bool {
        self.credit_sale
    }

    #[inline]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of unique lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> Quantity {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of discounted, pre-tax line bases.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(|l| l.taxable_base()).sum()
    }

    /// The order-level discount taken off the subtotal.
    pub fn order_discount_amount(&self) -> Money {
        self.subtotal().percent_of(self.order_discount)
    }

    /// Sum of per-line tax amounts.
    ///
    /// Tax is computed per line on the line's discounted base; the
    /// order-level discount does not feed back into it.
    pub fn tax_total(&self) -> Money {
        self.lines.iter().map(|l| l.tax_amount()).sum()
    }

    /// What the customer pays: `subtotal - order discount + tax`.
    pub fn grand_total(&self) -> Money {
        self.subtotal() - self.order_discount_amount() + self.tax_total()
    }

    fn line_mut(&mut self, product_id: &str) -> CartResult<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product.id == product_id)
            .ok_or_else(|| CartError::LineNotFound {
                product_id: product_id.to_string(),
            })
    }
}

// =============================================================================
// View Types
// =============================================================================

/// One rendered cart line for the terminal front-end.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct CartLineView {
    pub product: ProductSnapshot,
    pub quantity: Quantity,
    pub unit_price: Money,
    pub discount_percent: Percent,
    pub discount_amount: Money,
    pub tax_amount: Money,
    pub line_total: Money,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        let amounts = line.amounts();
        CartLineView {
            product: line.product.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            discount_percent: line.discount,
            discount_amount: amounts.discount_amount,
            tax_amount: amounts.tax_amount,
            line_total: amounts.line_total,
        }
    }
}

/// Cart totals summary for the totals panel.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: Quantity,
    pub subtotal: Money,
    pub order_discount_amount: Money,
    pub tax_total: Money,
    pub grand_total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            order_discount_amount: cart.order_discount_amount(),
            tax_total: cart.tax_total(),
            grand_total: cart.grand_total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
