// src/kiosk/services/verification.rs
use crate::adapter::camera::{CameraPort, CameraStream};
use crate::error::KioskError;
use crate::metrics;
use crate::models::audit_log::AuditKind;
use crate::models::verification::{
    CapturedFrame, VerificationSession, VerificationStatus, VerifiedIdentity,
};
use crate::storage::{append_audit_entry, store_verified_uid};
use crate::utils::crypto::mask_student_uid;
use crate::utils::rate_limit::SubmitLimiter;
use crate::utils::time::now_ms;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_SUBMIT_DEADLINE: Duration = Duration::from_secs(10);

/// Backend collaborator that matches a captured ID-card frame to a student.
/// The deadline is explicit so a hung backend cannot pin the UI in
/// `Verifying` forever.
#[async_trait]
pub trait VerificationService: Send + Sync {
    /// Distinguishes three failures: `Network` (unreachable or deadline
    /// elapsed), `Backend` (non-2xx), `NotRecognized` (well-formed negative
    /// result). Callers surface each with different text.
    async fn verify_frame(
        &self,
        frame: &CapturedFrame,
        deadline: Duration,
    ) -> Result<VerifiedIdentity, KioskError>;
}

/// Drives one identity-verification session: camera acquisition, frame
/// capture, submission, outcome. All transitions happen inside `&mut self`
/// methods, so no two can be in flight for the same session.
pub struct VerificationFlow {
    session: VerificationSession,
    camera: Arc<dyn CameraPort>,
    service: Arc<dyn VerificationService>,
    stream: Option<CameraStream>,
    limiter: SubmitLimiter,
    deadline: Duration,
}

impl VerificationFlow {
    pub fn new(camera: Arc<dyn CameraPort>, service: Arc<dyn VerificationService>) -> Self {
        Self {
            session: VerificationSession::new(now_ms()),
            camera,
            service,
            stream: None,
            limiter: SubmitLimiter::default(),
            deadline: DEFAULT_SUBMIT_DEADLINE,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    pub fn status(&self) -> VerificationStatus {
        self.session.status
    }

    fn invalid(&self, action: &str) -> KioskError {
        KioskError::InvalidState {
            state: self.session.status.as_str().to_string(),
            action: action.to_string(),
        }
    }

    fn release_camera(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
    }

    /// `Idle -> Requesting -> Ready | Denied`. A denial or device error is
    /// terminal for the session until the user explicitly retries.
    pub async fn request_camera(&mut self) -> Result<VerificationStatus, KioskError> {
        if self.session.status != VerificationStatus::Idle {
            return Err(self.invalid("request_camera"));
        }
        self.session.status = VerificationStatus::Requesting;

        match self.camera.acquire().await {
            Ok(stream) => {
                self.stream = Some(stream);
                self.session.status = VerificationStatus::Ready;
                self.session.failure = None;
            }
            Err(e) => {
                warn!(reason = %e, "camera acquisition failed");
                self.session.status = VerificationStatus::Denied;
                self.session.failure = Some(e.user_message());
                metrics::record_camera_denied();
                append_audit_entry(now_ms(), AuditKind::CameraDenied, None, e.user_message());
            }
        }
        Ok(self.session.status)
    }

    /// `Ready -> Captured`. A capture error leaves the state unchanged; the
    /// user is told to retry.
    pub async fn capture(&mut self) -> Result<VerificationStatus, KioskError> {
        if self.session.status != VerificationStatus::Ready {
            return Err(self.invalid("capture"));
        }
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| KioskError::Internal("ready without a live stream".to_string()))?;

        match stream.capture().await {
            Ok(frame) => {
                self.session.captured_frame = Some(frame);
                self.session.status = VerificationStatus::Captured;
                Ok(self.session.status)
            }
            Err(e) => {
                warn!(reason = %e, "frame capture failed, state unchanged");
                Err(e)
            }
        }
    }

    /// `Captured -> Ready`, replacing the held frame wholesale. If the camera
    /// was torn down in the meantime the session falls back to `Idle` so the
    /// stream gets re-acquired.
    pub fn retake(&mut self) -> Result<VerificationStatus, KioskError> {
        if self.session.status != VerificationStatus::Captured {
            return Err(self.invalid("retake"));
        }
        self.session.captured_frame = None;
        self.session.status = if self.stream.is_some() {
            VerificationStatus::Ready
        } else {
            VerificationStatus::Idle
        };
        Ok(self.session.status)
    }

    /// `Captured -> Verifying -> Success | Fail`. Submission is accepted only
    /// in `Captured`, which makes a double submit impossible; the outcome is
    /// returned as the new status, never as an unhandled error.
    pub async fn submit(&mut self) -> Result<VerificationStatus, KioskError> {
        if self.session.status != VerificationStatus::Captured {
            return Err(self.invalid("submit"));
        }
        // Refusal here is a gate, not a transition: the frame stays held.
        self.limiter.check()?;

        let frame = self
            .session
            .captured_frame
            .clone()
            .ok_or_else(|| KioskError::Internal("captured without a frame".to_string()))?;

        self.session.status = VerificationStatus::Verifying;
        metrics::record_verification_attempt();

        match self.service.verify_frame(&frame, self.deadline).await {
            Ok(identity) => {
                info!(student = %mask_student_uid(&identity.student_uid), "identity verified");
                store_verified_uid(&identity.student_uid);
                append_audit_entry(
                    now_ms(),
                    AuditKind::VerificationSucceeded,
                    Some(mask_student_uid(&identity.student_uid)),
                    "id card matched",
                );
                metrics::record_verification_success();
                self.session.identity = Some(identity);
                self.session.failure = None;
                self.session.status = VerificationStatus::Success;
                // Success navigates away from the capture page.
                self.release_camera();
            }
            Err(e) => {
                warn!(reason = %e, "verification failed");
                append_audit_entry(now_ms(), AuditKind::VerificationFailed, None, e.user_message());
                metrics::record_verification_failure();
                self.session.failure = Some(e.user_message());
                self.session.status = VerificationStatus::Fail;
            }
        }
        Ok(self.session.status)
    }

    /// User-initiated retry out of `Fail` or `Denied`. Nothing retries
    /// automatically.
    pub fn retry(&mut self) -> Result<VerificationStatus, KioskError> {
        match self.session.status {
            VerificationStatus::Fail => {
                self.session.captured_frame = None;
                self.session.failure = None;
                self.session.status = if self.stream.is_some() {
                    VerificationStatus::Ready
                } else {
                    VerificationStatus::Idle
                };
                Ok(self.session.status)
            }
            VerificationStatus::Denied => {
                self.session.failure = None;
                self.session.status = VerificationStatus::Idle;
                Ok(self.session.status)
            }
            _ => Err(self.invalid("retry")),
        }
    }

    /// Tab hidden: the camera must be released immediately. A live preview
    /// session falls back to `Idle` for re-acquisition on return.
    pub fn on_visibility_hidden(&mut self) {
        self.release_camera();
        if matches!(
            self.session.status,
            VerificationStatus::Requesting | VerificationStatus::Ready
        ) {
            self.session.status = VerificationStatus::Idle;
        }
    }

    /// Page unload: same release contract as teardown.
    pub fn on_unload(&mut self) {
        self.release_camera();
    }

    /// Forces a verified session with a placeholder identity. Debug escape
    /// hatch only; the feature must stay off in production builds.
    #[cfg(feature = "dev-bypass")]
    pub fn force_verified(&mut self) -> VerificationStatus {
        let identity = VerifiedIdentity {
            student_uid: "DEV-0000".to_string(),
            display_name: "Dev Student".to_string(),
        };
        self.release_camera();
        store_verified_uid(&identity.student_uid);
        append_audit_entry(
            now_ms(),
            AuditKind::VerificationSucceeded,
            Some(mask_student_uid(&identity.student_uid)),
            "dev bypass",
        );
        self.session.captured_frame = None;
        self.session.failure = None;
        self.session.identity = Some(identity);
        self.session.status = VerificationStatus::Success;
        self.session.status
    }
}

// The stream guard's own Drop stops the tracks, so dropping the flow releases
// the camera on component teardown without further ceremony.
