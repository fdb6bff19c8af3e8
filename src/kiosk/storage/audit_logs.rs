// src/kiosk/storage/audit_logs.rs
use crate::models::audit_log::{AuditEntry, AuditKind};
use crate::models::common::Timestamp;
use std::cell::RefCell;
use std::collections::VecDeque;

// Bounded so an unattended kiosk cannot grow the log without limit.
const AUDIT_LOG_CAPACITY: usize = 512;

thread_local! {
    static AUDIT_LOG: RefCell<VecDeque<AuditEntry>> = RefCell::new(VecDeque::new());
}

/// Appends one entry, evicting the oldest once the capacity is reached.
pub fn append_audit_entry(
    at: Timestamp,
    kind: AuditKind,
    masked_uid: Option<String>,
    detail: impl Into<String>,
) {
    AUDIT_LOG.with(|log| {
        let mut log = log.borrow_mut();
        if log.len() == AUDIT_LOG_CAPACITY {
            log.pop_front();
        }
        log.push_back(AuditEntry {
            at,
            kind,
            masked_uid,
            detail: detail.into(),
        });
    });
}

/// Returns a page of entries, newest last.
pub fn audit_entries(offset: usize, limit: usize) -> Vec<AuditEntry> {
    AUDIT_LOG.with(|log| log.borrow().iter().skip(offset).take(limit).cloned().collect())
}

pub fn audit_len() -> usize {
    AUDIT_LOG.with(|log| log.borrow().len())
}

#[cfg(test)]
pub fn clear_audit_log() {
    AUDIT_LOG.with(|log| log.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_bounded_and_ordered() {
        clear_audit_log();
        for i in 0..(AUDIT_LOG_CAPACITY + 10) {
            append_audit_entry(i as Timestamp, AuditKind::OrderCompleted, None, "order");
        }
        assert_eq!(audit_len(), AUDIT_LOG_CAPACITY);
        // Oldest ten evicted.
        assert_eq!(audit_entries(0, 1)[0].at, 10);
        clear_audit_log();
    }
}
