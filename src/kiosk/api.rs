// src/kiosk/api.rs
//
// The surface the page layer talks to. One `Kiosk` per physical terminal
// session; all collaborators are injected so every flow is testable without
// a camera or a network.
use crate::adapter::camera::CameraPort;
use crate::error::KioskError;
use crate::metrics;
use crate::models::audit_log::AuditKind;
use crate::models::cart::{CheckoutStage, Order};
use crate::models::catalog::{Bundle, Product};
use crate::models::common::{Language, PaymentMethod, ProductId, Rupees, StudentUid};
use crate::models::profile::StudentProfile;
use crate::models::triage::{TriageAssessment, TriageInput};
use crate::models::verification::{VerificationSession, VerificationStatus};
use crate::services::cart::Cart;
use crate::services::profile::{ProfileService, ProfileUpdate};
use crate::services::triage;
use crate::services::verification::{VerificationFlow, VerificationService};
use crate::storage;
use crate::utils::crypto::mask_student_uid;
use crate::utils::guards::check_analyze_ready;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use validator::Validate;

const DEFAULT_BACKEND_DEADLINE: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct KioskConfig {
    pub language: Language,
    /// Upper bound on every backend call; a hung backend surfaces as a
    /// network failure instead of a stuck screen.
    pub backend_deadline: Duration,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            language: Language::English,
            backend_deadline: DEFAULT_BACKEND_DEADLINE,
        }
    }
}

// --- Validation helper ---

fn validate_request<T: Validate>(req: &T) -> Result<(), KioskError> {
    req.validate()
        .map_err(|e| KioskError::Validation(e.to_string()))
}

// --- Request structs ---

#[derive(Clone, Debug, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1))]
    pub uid: StudentUid,
    #[validate(range(min = 5, max = 120))]
    pub age: Option<u8>,
    #[validate(length(max = 200))]
    pub allergy: Option<String>,
    #[validate(length(equal = 10))]
    pub number: Option<String>,
}

pub struct Kiosk {
    verification: VerificationFlow,
    cart: Cart,
    profiles: Arc<dyn ProfileService>,
    language: Language,
    deadline: Duration,
}

impl Kiosk {
    pub fn new(
        camera: Arc<dyn CameraPort>,
        verifier: Arc<dyn VerificationService>,
        profiles: Arc<dyn ProfileService>,
        config: KioskConfig,
    ) -> Self {
        Self {
            verification: VerificationFlow::new(camera, verifier)
                .with_deadline(config.backend_deadline),
            cart: Cart::new(),
            profiles,
            language: config.language,
            deadline: config.backend_deadline,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    // --- Identity verification ---

    pub fn verification_session(&self) -> &VerificationSession {
        self.verification.session()
    }

    pub async fn request_camera(&mut self) -> Result<VerificationStatus, KioskError> {
        self.verification.request_camera().await
    }

    pub async fn capture_frame(&mut self) -> Result<VerificationStatus, KioskError> {
        self.verification.capture().await
    }

    pub fn retake(&mut self) -> Result<VerificationStatus, KioskError> {
        self.verification.retake()
    }

    pub async fn submit_id_card(&mut self) -> Result<VerificationStatus, KioskError> {
        self.verification.submit().await
    }

    pub fn retry_verification(&mut self) -> Result<VerificationStatus, KioskError> {
        self.verification.retry()
    }

    pub fn on_visibility_hidden(&mut self) {
        self.verification.on_visibility_hidden();
    }

    pub fn on_unload(&mut self) {
        self.verification.on_unload();
    }

    #[cfg(feature = "dev-bypass")]
    pub fn force_verified(&mut self) -> VerificationStatus {
        self.verification.force_verified()
    }

    // --- Triage ---

    /// Gated Analyze action: both a photo and a long-enough description are
    /// required, and the error names whichever is missing.
    pub fn analyze(
        &self,
        description: &str,
        has_image: bool,
    ) -> Result<TriageAssessment, KioskError> {
        check_analyze_ready(description, has_image)?;
        let assessment = triage::classify(&TriageInput {
            description: description.to_string(),
            has_image,
            language: self.language,
        });
        metrics::record_triage_run(assessment.needs_doctor);
        Ok(assessment)
    }

    /// Live preview while the user is still typing; `None` hides all
    /// dependent UI rather than showing an "unknown" assessment.
    pub fn preview_assessment(
        &self,
        description: &str,
        has_image: bool,
    ) -> Option<TriageAssessment> {
        triage::assess(&TriageInput {
            description: description.to_string(),
            has_image,
            language: self.language,
        })
    }

    // --- Quick-buy storefront ---

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart.add_to_cart(product);
    }

    pub fn add_bundle_to_cart(&mut self, bundle: &Bundle) {
        self.cart.add_bundle_to_cart(bundle);
    }

    pub fn update_quantity(&mut self, id: &ProductId, delta: i64) {
        self.cart.update_quantity(id, delta);
    }

    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.cart.remove_from_cart(id);
    }

    pub fn cart_total(&self) -> Rupees {
        self.cart.total()
    }

    pub fn review_cart(&mut self) -> Result<(), KioskError> {
        self.cart.review_cart()
    }

    pub fn proceed_to_payment(&mut self) -> Result<(), KioskError> {
        self.cart.proceed_to_payment()
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.cart.select_payment_method(method);
    }

    pub fn checkout_stage(&self) -> CheckoutStage {
        self.cart.stage()
    }

    /// Completes checkout, records the order in metrics and the audit trail
    /// (masked identity only), and hands the snapshot to the confirmation
    /// view.
    pub fn complete_purchase(&mut self) -> Result<Order, KioskError> {
        let order = self.cart.complete_purchase()?;
        metrics::record_order(order.total, order.placed_at);
        storage::append_audit_entry(
            order.placed_at,
            AuditKind::OrderCompleted,
            storage::verified_uid().map(|uid| mask_student_uid(&uid)),
            format!(
                "{}: {} line(s), {} via {}",
                order.order_id,
                order.lines.len(),
                order.total,
                order.payment_method.label()
            ),
        );
        info!(order = %order.order_id, total = order.total, "purchase completed");
        Ok(order)
    }

    pub fn dismiss_confirmation(&mut self) {
        self.cart.dismiss_confirmation();
    }

    // --- Account settings ---

    /// Looks the profile up on the backend and refreshes the local record.
    pub async fn load_profile(&self, uid: &StudentUid) -> Result<StudentProfile, KioskError> {
        let profile = self.profiles.fetch_profile(uid, self.deadline).await?;
        storage::save_profile(&profile)?;
        Ok(profile)
    }

    /// Validates, pushes the change to the backend, then mirrors it into the
    /// local record. The local copy is only touched after the backend
    /// accepts.
    pub async fn update_profile(&self, req: &UpdateProfileRequest) -> Result<(), KioskError> {
        validate_request(req)?;
        let update = ProfileUpdate {
            uid: req.uid.clone(),
            age: req.age,
            allergy: req.allergy.clone(),
            number: req.number.clone(),
        };
        self.profiles.update_profile(&update, self.deadline).await?;

        if let Some(mut profile) = storage::load_profile()? {
            if profile.uid == req.uid {
                profile.age = req.age;
                profile.allergy = req.allergy.clone();
                profile.number = req.number.clone();
                storage::save_profile(&profile)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::camera::test_support::ScriptedCamera;
    use crate::models::verification::{CapturedFrame, VerifiedIdentity};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    struct StubVerifier;

    #[async_trait]
    impl VerificationService for StubVerifier {
        async fn verify_frame(
            &self,
            _frame: &CapturedFrame,
            _deadline: Duration,
        ) -> Result<VerifiedIdentity, KioskError> {
            Ok(VerifiedIdentity {
                student_uid: "STU-2024-0042".to_string(),
                display_name: "Asha".to_string(),
            })
        }
    }

    struct StubProfiles;

    #[async_trait]
    impl ProfileService for StubProfiles {
        async fn fetch_profile(
            &self,
            uid: &StudentUid,
            _deadline: Duration,
        ) -> Result<StudentProfile, KioskError> {
            Ok(StudentProfile {
                uid: uid.clone(),
                full_name: "Asha Verma".to_string(),
                name: "Asha".to_string(),
                ..Default::default()
            })
        }

        async fn update_profile(
            &self,
            _update: &ProfileUpdate,
            _deadline: Duration,
        ) -> Result<(), KioskError> {
            Ok(())
        }
    }

    fn kiosk(language: Language) -> Kiosk {
        Kiosk::new(
            Arc::new(ScriptedCamera {
                grant: true,
                track_count: 1,
                stops: Arc::new(AtomicUsize::new(0)),
            }),
            Arc::new(StubVerifier),
            Arc::new(StubProfiles),
            KioskConfig {
                language,
                ..Default::default()
            },
        )
    }

    #[test]
    fn analyze_is_blocked_until_both_preconditions_hold() {
        let kiosk = kiosk(Language::English);
        assert!(matches!(
            kiosk.analyze("short", false),
            Err(KioskError::Validation(_))
        ));
        let assessment = kiosk.analyze("deep cut on my finger", true).unwrap();
        assert!(assessment.needs_doctor);
        assert_eq!(assessment.confidence, 85);
    }

    #[test]
    fn preview_follows_the_recompute_trigger() {
        let kiosk = kiosk(Language::English);
        assert!(kiosk.preview_assessment("short", false).is_none());
        assert!(kiosk.preview_assessment("short", true).is_some());
    }

    #[test]
    fn kiosk_language_reaches_the_classifier() {
        let kiosk = kiosk(Language::Hindi);
        let assessment = kiosk.analyze("हाथ पर गहरा घाव है", true).unwrap();
        assert!(assessment.needs_doctor);
    }

    #[test]
    fn complete_purchase_records_metrics_and_audit() {
        crate::metrics::reset_metrics();
        crate::storage::audit_logs::clear_audit_log();

        let mut kiosk = kiosk(Language::English);
        kiosk.add_to_cart(&Product {
            id: "bandage".to_string(),
            name: "Bandage".to_string(),
            price: 15,
            stock: 10,
        });
        kiosk.review_cart().unwrap();
        kiosk.proceed_to_payment().unwrap();
        kiosk.select_payment_method(PaymentMethod::Cash);
        let order = kiosk.complete_purchase().unwrap();
        assert_eq!(order.total, 15);

        let m = crate::metrics::kiosk_metrics();
        assert_eq!(m.orders_completed, 1);
        assert_eq!(m.revenue_total, 15);

        let entries = crate::storage::audit_entries(0, 10);
        assert_eq!(entries.len(), 1);
        assert!(entries[0].detail.contains(&order.order_id));
    }

    #[tokio::test]
    async fn load_profile_refreshes_the_local_record() {
        crate::storage::clear_profile();
        let kiosk = kiosk(Language::English);
        let profile = kiosk.load_profile(&"STU-9".to_string()).await.unwrap();
        assert_eq!(profile.full_name, "Asha Verma");
        assert_eq!(
            crate::storage::load_profile().unwrap().map(|p| p.uid),
            Some("STU-9".to_string())
        );
    }

    #[tokio::test]
    async fn update_profile_rejects_invalid_input_before_the_backend() {
        let kiosk = kiosk(Language::English);
        let req = UpdateProfileRequest {
            uid: "STU-9".to_string(),
            age: Some(3), // below the plausible student range
            allergy: None,
            number: None,
        };
        assert!(matches!(
            kiosk.update_profile(&req).await,
            Err(KioskError::Validation(_))
        ));

        let req = UpdateProfileRequest {
            uid: "STU-9".to_string(),
            age: Some(21),
            allergy: Some("penicillin".to_string()),
            number: Some("9876543210".to_string()),
        };
        kiosk.update_profile(&req).await.unwrap();
    }

    #[tokio::test]
    async fn verification_is_reachable_through_the_facade() {
        crate::storage::session_store::clear();
        let mut kiosk = kiosk(Language::English);
        kiosk.request_camera().await.unwrap();
        kiosk.capture_frame().await.unwrap();
        assert_eq!(
            kiosk.submit_id_card().await.unwrap(),
            VerificationStatus::Success
        );
        assert_eq!(
            crate::storage::verified_uid().as_deref(),
            Some("STU-2024-0042")
        );
    }
}
