// src/kiosk/lib.rs
//! Core logic of the campus health-assistance kiosk: identity verification
//! (camera capture plus backend match), keyword triage of described
//! complaints, and the quick-buy cart with its checkout flow. The page layer
//! renders state; everything that decides lives here, behind injected
//! collaborators so it runs without a camera or a network in tests.

pub mod adapter;
pub mod api;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use api::{Kiosk, KioskConfig};
pub use error::KioskError;
