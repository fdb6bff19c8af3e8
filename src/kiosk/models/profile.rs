// src/kiosk/models/profile.rs
use crate::models::common::{Language, StudentUid};
use serde::{Deserialize, Serialize};

/// Persisted profile record behind the cookie-style store. Field names match
/// the shape the page layer reads back.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct StudentProfile {
    pub uid: StudentUid,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub name: String,
    pub age: Option<u8>,
    pub allergy: Option<String>,
    pub number: Option<String>,
    #[serde(default)]
    pub language: Language,
}
