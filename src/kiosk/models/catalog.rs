// src/kiosk/models/catalog.rs
use crate::models::common::{ProductId, Rupees};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Rupees,
    pub stock: u32,
}

/// Fixed-price composite of several physical products sold as one unit.
/// Contents are descriptive only; the cart never decomposes a bundle into
/// constituent product lines.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Bundle {
    pub id: ProductId,
    pub name: String,
    pub price: Rupees,
    pub stock: u32,
    pub contents: Vec<String>,
}
