// src/kiosk/metrics.rs
use crate::models::common::{Rupees, Timestamp};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Operational counters for one kiosk process. Held in memory; the kiosk has
/// no metrics backend, the page layer polls these for its status panel.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct KioskMetrics {
    pub verifications_attempted: u64,
    pub verifications_succeeded: u64,
    pub verifications_failed: u64,
    pub cameras_denied: u64,
    pub triage_runs: u64,
    pub urgent_triage_runs: u64,
    pub orders_completed: u64,
    pub revenue_total: Rupees,
    pub last_order_at: Option<Timestamp>,
}

thread_local! {
    static METRICS: RefCell<KioskMetrics> = RefCell::new(KioskMetrics::default());
}

pub fn update_metrics<F>(f: F)
where
    F: FnOnce(&mut KioskMetrics),
{
    METRICS.with(|m| f(&mut m.borrow_mut()));
}

pub fn kiosk_metrics() -> KioskMetrics {
    METRICS.with(|m| m.borrow().clone())
}

#[cfg(test)]
pub fn reset_metrics() {
    METRICS.with(|m| *m.borrow_mut() = KioskMetrics::default());
}

// --- Update helpers ---

pub fn record_verification_attempt() {
    update_metrics(|m| m.verifications_attempted = m.verifications_attempted.saturating_add(1));
}

pub fn record_verification_success() {
    update_metrics(|m| m.verifications_succeeded = m.verifications_succeeded.saturating_add(1));
}

pub fn record_verification_failure() {
    update_metrics(|m| m.verifications_failed = m.verifications_failed.saturating_add(1));
}

pub fn record_camera_denied() {
    update_metrics(|m| m.cameras_denied = m.cameras_denied.saturating_add(1));
}

pub fn record_triage_run(urgent: bool) {
    update_metrics(|m| {
        m.triage_runs = m.triage_runs.saturating_add(1);
        if urgent {
            m.urgent_triage_runs = m.urgent_triage_runs.saturating_add(1);
        }
    });
}

pub fn record_order(total: Rupees, at: Timestamp) {
    update_metrics(|m| {
        m.orders_completed = m.orders_completed.saturating_add(1);
        m.revenue_total = m.revenue_total.saturating_add(total);
        m.last_order_at = Some(at);
    });
}
