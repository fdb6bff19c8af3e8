// src/kiosk/models/cart.rs
use crate::models::common::{OrderId, PaymentMethod, ProductId, Rupees, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Rupees,
    pub quantity: u32,
    /// Stock of the originating product at insert time. Quantity is never
    /// allowed past this, in the cart operations themselves rather than at
    /// the button layer.
    pub stock_ceiling: u32,
}

impl CartLine {
    pub fn line_total(&self) -> Rupees {
        self.unit_price * self.quantity as Rupees
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy, Default)]
pub enum CheckoutStage {
    #[default]
    Browsing,
    ReviewingCart,
    ChoosingPayment,
    Confirmed,
}

/// Snapshot taken at checkout completion. Shown once in the confirmation
/// view, then discarded; the order id is display-only and not guaranteed
/// globally unique.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub lines: Vec<CartLine>,
    pub total: Rupees,
    pub payment_method: PaymentMethod,
    pub placed_at: Timestamp,
}
