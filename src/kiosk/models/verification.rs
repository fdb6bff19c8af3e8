// src/kiosk/models/verification.rs
use crate::models::common::{StudentUid, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy)]
pub enum VerificationStatus {
    Idle,       // Session created, camera not yet requested
    Requesting, // Waiting on the camera permission prompt
    Ready,      // Live stream acquired, waiting for the user to capture
    Captured,   // A frame is held, waiting for submit or retake
    Verifying,  // Frame submitted, waiting on the backend
    Success,    // Identity confirmed, session effectively terminal
    Fail,       // Backend rejected or unreachable, user may retry
    Denied,     // Camera permission denied or device error
}

impl VerificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationStatus::Idle => "idle",
            VerificationStatus::Requesting => "requesting",
            VerificationStatus::Ready => "ready",
            VerificationStatus::Captured => "captured",
            VerificationStatus::Verifying => "verifying",
            VerificationStatus::Success => "success",
            VerificationStatus::Fail => "fail",
            VerificationStatus::Denied => "denied",
        }
    }
}

/// One frame drawn from the live stream at the video's native resolution.
/// The session owns the bytes exclusively; a retake replaces the whole value.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CapturedFrame {
    #[serde(with = "serde_bytes")]
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub student_uid: StudentUid,
    pub display_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VerificationSession {
    pub status: VerificationStatus,
    pub captured_frame: Option<CapturedFrame>,
    pub identity: Option<VerifiedIdentity>,
    /// User-presentable reason for `Fail` or `Denied`.
    pub failure: Option<String>,
    pub started_at: Timestamp,
}

impl VerificationSession {
    pub fn new(started_at: Timestamp) -> Self {
        Self {
            status: VerificationStatus::Idle,
            captured_frame: None,
            identity: None,
            failure: None,
            started_at,
        }
    }

    /// Session-level invariants: a frame exists only in
    /// Captured/Verifying/Success/Fail, an identity only in Success.
    pub fn invariants_hold(&self) -> bool {
        use VerificationStatus::*;
        let frame_ok = match self.status {
            Captured | Verifying | Success | Fail => true,
            Idle | Requesting | Ready | Denied => self.captured_frame.is_none(),
        };
        let identity_ok = self.identity.is_none() || self.status == Success;
        frame_ok && identity_ok
    }
}
