// src/kiosk/models/audit_log.rs
use crate::models::common::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy)]
pub enum AuditKind {
    VerificationSucceeded,
    VerificationFailed,
    CameraDenied,
    OrderCompleted,
}

/// Append-only record of kiosk events. Identities enter the log only as
/// masked tokens (see `utils::crypto::mask_student_uid`), never raw uids.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuditEntry {
    pub at: Timestamp,
    pub kind: AuditKind,
    pub masked_uid: Option<String>,
    pub detail: String,
}
