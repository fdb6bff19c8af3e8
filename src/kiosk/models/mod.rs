// src/kiosk/models/mod.rs
pub mod audit_log;
pub mod cart;
pub mod catalog;
pub mod common;
pub mod profile;
pub mod triage;
pub mod verification;

// Re-export common types/enums for easier access
pub use common::*;
