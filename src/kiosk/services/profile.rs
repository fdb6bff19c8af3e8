// src/kiosk/services/profile.rs
use crate::error::KioskError;
use crate::models::common::StudentUid;
use crate::models::profile::StudentProfile;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Fields a student may change from the account-settings page. Everything
/// else on the profile is owned by the campus records backend.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub uid: StudentUid,
    pub age: Option<u8>,
    pub allergy: Option<String>,
    pub number: Option<String>,
}

/// Backend collaborator for profile lookup and update. Same deadline
/// discipline as verification: no call may hang the UI.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn fetch_profile(
        &self,
        uid: &StudentUid,
        deadline: Duration,
    ) -> Result<StudentProfile, KioskError>;

    async fn update_profile(
        &self,
        update: &ProfileUpdate,
        deadline: Duration,
    ) -> Result<(), KioskError>;
}
