// src/kiosk/services/cart.rs
use crate::error::KioskError;
use crate::models::cart::{CartLine, CheckoutStage, Order};
use crate::models::catalog::{Bundle, Product};
use crate::models::common::{PaymentMethod, ProductId, Rupees};
use crate::utils::rng::generate_order_id;
use crate::utils::time::now_ms;
use tracing::debug;

/// Quick-buy cart plus its checkout sub-state machine. Lines keep insertion
/// order; mutations are synchronous and resolve in dispatch order.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    stage: CheckoutStage,
    payment_method: Option<PaymentMethod>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `unit_price * quantity` over all lines. Recomputed on every
    /// read, never cached.
    pub fn total(&self) -> Rupees {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    fn insert_or_increment(&mut self, id: &str, name: &str, price: Rupees, stock: u32) {
        if stock == 0 {
            debug!(id, "add_to_cart ignored: out of stock");
            return;
        }
        match self.lines.iter_mut().find(|l| l.id == id) {
            Some(line) => {
                // At the ceiling the add is silently refused, not an error.
                if line.quantity < line.stock_ceiling {
                    line.quantity += 1;
                }
            }
            None => self.lines.push(CartLine {
                id: id.to_string(),
                name: name.to_string(),
                unit_price: price,
                quantity: 1,
                stock_ceiling: stock,
            }),
        }
    }

    /// No-op when the product is out of stock or the line already sits at its
    /// stock ceiling; otherwise inserts at quantity 1 or increments.
    pub fn add_to_cart(&mut self, product: &Product) {
        self.insert_or_increment(&product.id, &product.name, product.price, product.stock);
    }

    /// A bundle is one cart line with its own id and flat price; contents are
    /// descriptive only and never decomposed into product lines.
    pub fn add_bundle_to_cart(&mut self, bundle: &Bundle) {
        self.insert_or_increment(&bundle.id, &bundle.name, bundle.price, bundle.stock);
    }

    /// Applies `delta` to the matching line. A result of zero or below
    /// removes the line entirely; an increment past the stock ceiling clamps
    /// to the ceiling. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        let Some(idx) = self.lines.iter().position(|l| l.id == *id) else {
            return;
        };
        let line = &mut self.lines[idx];
        let next = line.quantity as i64 + delta;
        if next <= 0 {
            self.lines.remove(idx);
        } else {
            line.quantity = (next as u32).min(line.stock_ceiling);
        }
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.lines.retain(|l| l.id != *id);
    }

    // --- Checkout sub-state machine: Browsing -> ReviewingCart ->
    // --- ChoosingPayment -> Confirmed ---

    pub fn review_cart(&mut self) -> Result<(), KioskError> {
        if self.is_empty() {
            return Err(KioskError::Validation("cart is empty".to_string()));
        }
        self.stage = CheckoutStage::ReviewingCart;
        Ok(())
    }

    pub fn proceed_to_payment(&mut self) -> Result<(), KioskError> {
        if self.stage != CheckoutStage::ReviewingCart {
            return Err(KioskError::InvalidState {
                state: format!("{:?}", self.stage),
                action: "proceed_to_payment".to_string(),
            });
        }
        self.stage = CheckoutStage::ChoosingPayment;
        Ok(())
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    /// Leaves checkout without purchasing; the cart contents survive.
    pub fn back_to_browsing(&mut self) {
        self.stage = CheckoutStage::Browsing;
        self.payment_method = None;
    }

    /// Snapshots the cart into an `Order`, clears it, and moves to
    /// `Confirmed`. Gated on an explicitly chosen payment method and a
    /// non-empty cart; once past the gates it always succeeds (there is no
    /// payment gateway behind the kiosk).
    pub fn complete_purchase(&mut self) -> Result<Order, KioskError> {
        let payment_method = self.payment_method.ok_or_else(|| {
            KioskError::Validation("choose a payment method first".to_string())
        })?;
        if self.is_empty() {
            return Err(KioskError::Validation("cart is empty".to_string()));
        }

        let lines = std::mem::take(&mut self.lines);
        let total = lines.iter().map(CartLine::line_total).sum();
        let order = Order {
            order_id: generate_order_id(),
            lines,
            total,
            payment_method,
            placed_at: now_ms(),
        };

        self.payment_method = None;
        self.stage = CheckoutStage::Confirmed;
        Ok(order)
    }

    /// The confirmation view was dismissed; the order is discarded by the
    /// caller and the storefront returns to browsing.
    pub fn dismiss_confirmation(&mut self) {
        self.stage = CheckoutStage::Browsing;
    }
}
