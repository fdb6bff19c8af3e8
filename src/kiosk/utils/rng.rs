// src/kiosk/utils/rng.rs
use crate::models::common::OrderId;
use crate::utils::time::now_ms;
use rand::Rng;

const ORDER_SUFFIX_LEN: usize = 4;
const ORDER_SUFFIX_ALPHABET: &[u8] = b"ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Order ids are time-plus-random and display-only. They are readable on a
/// receipt, not guaranteed globally unique.
pub fn generate_order_id() -> OrderId {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ORDER_SUFFIX_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..ORDER_SUFFIX_ALPHABET.len());
            ORDER_SUFFIX_ALPHABET[idx] as char
        })
        .collect();
    format!("ORD-{}-{}", now_ms(), suffix)
}
