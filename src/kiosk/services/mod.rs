// src/kiosk/services/mod.rs
pub mod cart;
pub mod profile;
pub mod triage;
pub mod verification;
