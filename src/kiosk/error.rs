// src/kiosk/error.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum KioskError {
    #[error("Camera unavailable: {0}")]
    CameraDenied(String),

    #[error("Could not capture a frame: {0}")]
    CaptureFailed(String),

    // The three submission failure modes are deliberately separate variants.
    // "Can't reach the server" must never read like "ID not recognized".
    #[error("Could not reach the verification server: {0}")]
    Network(String),

    #[error("Verification server returned an error (HTTP {status})")]
    Backend { status: u16 },

    #[error("ID not recognized: {0}")]
    NotRecognized(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Operation not allowed in state {state}: {action}")]
    InvalidState { state: String, action: String },

    #[error("Too many attempts, please wait a moment: {0}")]
    RateLimited(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl KioskError {
    /// Text safe to show on the kiosk screen. Every terminal failure state
    /// renders this next to a retry affordance; no failure is silent.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
