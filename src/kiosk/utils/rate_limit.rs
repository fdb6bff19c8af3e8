// src/kiosk/utils/rate_limit.rs
use crate::error::KioskError;
use crate::models::common::Timestamp;
use crate::utils::time::now_ms;

// --- Configuration ---
const SUBMIT_CAPACITY: u32 = 5; // Max verification submissions in a burst
const SUBMIT_REFILL_RATE_PER_SEC: f64 = 0.2; // One token back every 5 seconds

/// Token bucket in front of verification submissions. A kiosk serves one
/// person at a time, so the bucket is per-flow rather than per-caller.
#[derive(Debug)]
pub struct SubmitLimiter {
    tokens: f64,
    last_refill_ms: Timestamp,
}

impl Default for SubmitLimiter {
    fn default() -> Self {
        Self {
            tokens: SUBMIT_CAPACITY as f64,
            last_refill_ms: now_ms(),
        }
    }
}

impl SubmitLimiter {
    fn refill(&mut self, now: Timestamp) {
        let elapsed_secs = now.saturating_sub(self.last_refill_ms) as f64 / 1_000.0;
        self.tokens =
            (self.tokens + elapsed_secs * SUBMIT_REFILL_RATE_PER_SEC).min(SUBMIT_CAPACITY as f64);
        self.last_refill_ms = now;
    }

    fn take_at(&mut self, now: Timestamp) -> bool {
        self.refill(now);
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Returns Ok(()) if a submission may go ahead.
    pub fn check(&mut self) -> Result<(), KioskError> {
        if self.take_at(now_ms()) {
            Ok(())
        } else {
            Err(KioskError::RateLimited(
                "verification attempts are limited, wait a few seconds".to_string(),
            ))
        }
    }
}
