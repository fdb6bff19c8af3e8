// src/kiosk/models/common.rs
use serde::{Deserialize, Serialize};

// Identifier types. Student uids come from the campus ID card barcode and are
// opaque strings as far as the kiosk is concerned.
pub type StudentUid = String;
pub type ProductId = String;
pub type OrderId = String;

pub type Timestamp = u64; // Epoch milliseconds
pub type Rupees = u64; // Whole-rupee prices; the storefront carries no paise

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy, Default)]
pub enum Language {
    #[default]
    English,
    Hindi,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy)]
pub enum PaymentMethod {
    Upi,
    Card,
    Cash,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::Cash => "Cash",
        }
    }
}
