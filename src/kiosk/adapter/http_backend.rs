// src/kiosk/adapter/http_backend.rs
//
// HTTP client for the campus backend. The kiosk owns no wire protocol; these
// are the backend's three endpoints consumed as opaque request/response
// contracts.
use crate::error::KioskError;
use crate::models::common::{Language, StudentUid};
use crate::models::profile::StudentProfile;
use crate::models::verification::{CapturedFrame, VerifiedIdentity};
use crate::services::profile::{ProfileService, ProfileUpdate};
use crate::services::verification::VerificationService;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const READ_BARCODE_PATH: &str = "/api/read-barcode";
const STUDENT_PROFILE_PATH: &str = "/api/student-profile";
const UPDATE_PROFILE_PATH: &str = "/api/update-profile";

// --- Wire shapes ---

#[derive(Serialize, Debug)]
struct ReadBarcodeRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize, Debug)]
struct ReadBarcodeResponse {
    success: bool,
    barcode: Option<String>,
    #[serde(rename = "firstName")]
    first_name: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct StudentProfileResponse {
    success: bool,
    uid: Option<String>,
    #[serde(rename = "firstName")]
    first_name: Option<String>,
    #[serde(rename = "fullName")]
    full_name: Option<String>,
    number: Option<String>,
    language: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize, Debug)]
struct UpdateProfileResponse {
    success: bool,
    message: Option<String>,
}

fn parse_language(raw: Option<&str>) -> Language {
    match raw.map(|s| s.to_ascii_lowercase()).as_deref() {
        Some("hi") | Some("hindi") => Language::Hindi,
        _ => Language::English,
    }
}

// --- Response decoding ---
// Kept as plain functions of (status, body) so the three failure modes are
// testable without a server.

fn decode_barcode_response(status: u16, body: &str) -> Result<VerifiedIdentity, KioskError> {
    if !(200..300).contains(&status) {
        return Err(KioskError::Backend { status });
    }
    let parsed: ReadBarcodeResponse = serde_json::from_str(body)
        .map_err(|e| KioskError::Internal(format!("malformed read-barcode response: {e}")))?;
    if !parsed.success {
        return Err(KioskError::NotRecognized(
            parsed
                .message
                .unwrap_or_else(|| "this ID card could not be matched".to_string()),
        ));
    }
    let student_uid = parsed.barcode.ok_or_else(|| {
        KioskError::Internal("read-barcode succeeded without a barcode".to_string())
    })?;
    Ok(VerifiedIdentity {
        display_name: parsed.first_name.unwrap_or_else(|| "Student".to_string()),
        student_uid,
    })
}

fn decode_profile_response(status: u16, body: &str) -> Result<StudentProfile, KioskError> {
    if !(200..300).contains(&status) {
        return Err(KioskError::Backend { status });
    }
    let parsed: StudentProfileResponse = serde_json::from_str(body)
        .map_err(|e| KioskError::Internal(format!("malformed student-profile response: {e}")))?;
    if !parsed.success {
        return Err(KioskError::NotRecognized(
            parsed
                .message
                .unwrap_or_else(|| "no profile found for this ID".to_string()),
        ));
    }
    Ok(StudentProfile {
        uid: parsed
            .uid
            .ok_or_else(|| KioskError::Internal("profile response missing uid".to_string()))?,
        full_name: parsed.full_name.unwrap_or_default(),
        name: parsed.first_name.unwrap_or_default(),
        age: None,
        allergy: None,
        number: parsed.number,
        language: parse_language(parsed.language.as_deref()),
    })
}

fn decode_update_response(status: u16, body: &str) -> Result<(), KioskError> {
    if !(200..300).contains(&status) {
        return Err(KioskError::Backend { status });
    }
    let parsed: UpdateProfileResponse = serde_json::from_str(body)
        .map_err(|e| KioskError::Internal(format!("malformed update-profile response: {e}")))?;
    if !parsed.success {
        return Err(KioskError::Validation(
            parsed
                .message
                .unwrap_or_else(|| "profile update was rejected".to_string()),
        ));
    }
    Ok(())
}

// --- Client ---

pub struct HttpBackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackendClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, KioskError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| KioskError::Internal(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Awaits `fut` under `deadline`; an elapsed deadline and a transport
    /// error are both `Network`, distinct from any HTTP status.
    async fn bounded(
        &self,
        deadline: Duration,
        fut: impl std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    ) -> Result<(u16, String), KioskError> {
        let response = tokio::time::timeout(deadline, fut)
            .await
            .map_err(|_| KioskError::Network("the request took too long".to_string()))?
            .map_err(|e| KioskError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| KioskError::Network(e.to_string()))?;
        debug!(status, "backend responded");
        Ok((status, body))
    }
}

#[async_trait]
impl VerificationService for HttpBackendClient {
    async fn verify_frame(
        &self,
        frame: &CapturedFrame,
        deadline: Duration,
    ) -> Result<VerifiedIdentity, KioskError> {
        let image = BASE64.encode(&frame.bytes);
        let url = format!("{}{}", self.base_url, READ_BARCODE_PATH);
        let fut = self
            .http
            .post(&url)
            .json(&ReadBarcodeRequest { image: &image })
            .send();
        let (status, body) = self.bounded(deadline, fut).await?;
        decode_barcode_response(status, &body)
    }
}

#[async_trait]
impl ProfileService for HttpBackendClient {
    async fn fetch_profile(
        &self,
        uid: &StudentUid,
        deadline: Duration,
    ) -> Result<StudentProfile, KioskError> {
        let url = format!("{}{}/{}", self.base_url, STUDENT_PROFILE_PATH, uid);
        let fut = self.http.get(&url).send();
        let (status, body) = self.bounded(deadline, fut).await?;
        decode_profile_response(status, &body)
    }

    async fn update_profile(
        &self,
        update: &ProfileUpdate,
        deadline: Duration,
    ) -> Result<(), KioskError> {
        let url = format!("{}{}", self.base_url, UPDATE_PROFILE_PATH);
        let fut = self.http.post(&url).json(update).send();
        let (status, body) = self.bounded(deadline, fut).await?;
        decode_update_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_2xx_is_a_protocol_error_not_a_rejection() {
        let err = decode_barcode_response(503, "").unwrap_err();
        assert_eq!(err, KioskError::Backend { status: 503 });
        // Different text from both the network and the negative-result cases.
        assert!(err.user_message().contains("503"));
    }

    #[test]
    fn negative_result_carries_the_backend_message() {
        let body = r#"{"success": false, "message": "barcode unreadable"}"#;
        let err = decode_barcode_response(200, body).unwrap_err();
        assert_eq!(err, KioskError::NotRecognized("barcode unreadable".to_string()));
    }

    #[test]
    fn positive_result_yields_an_identity() {
        let body = r#"{"success": true, "barcode": "STU-2024-0042", "firstName": "Asha"}"#;
        let identity = decode_barcode_response(200, body).unwrap();
        assert_eq!(identity.student_uid, "STU-2024-0042");
        assert_eq!(identity.display_name, "Asha");
    }

    #[test]
    fn missing_first_name_falls_back_to_a_generic_display_name() {
        let body = r#"{"success": true, "barcode": "STU-1"}"#;
        assert_eq!(decode_barcode_response(200, body).unwrap().display_name, "Student");
    }

    #[test]
    fn profile_response_maps_language_and_names() {
        let body = r#"{
            "success": true,
            "uid": "STU-1",
            "firstName": "Asha",
            "fullName": "Asha Verma",
            "number": "9876543210",
            "language": "hi"
        }"#;
        let profile = decode_profile_response(200, body).unwrap();
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.full_name, "Asha Verma");
        assert_eq!(profile.language, Language::Hindi);
        assert_eq!(profile.number.as_deref(), Some("9876543210"));
    }

    #[test]
    fn unknown_language_defaults_to_english() {
        assert_eq!(parse_language(Some("fr")), Language::English);
        assert_eq!(parse_language(None), Language::English);
        assert_eq!(parse_language(Some("Hindi")), Language::Hindi);
    }

    #[test]
    fn update_rejection_surfaces_the_message() {
        let body = r#"{"success": false, "message": "number already in use"}"#;
        let err = decode_update_response(200, body).unwrap_err();
        assert_eq!(err, KioskError::Validation("number already in use".to_string()));
        assert!(decode_update_response(200, r#"{"success": true}"#).is_ok());
    }

    #[test]
    fn malformed_body_is_an_internal_error() {
        assert!(matches!(
            decode_barcode_response(200, "not json"),
            Err(KioskError::Internal(_))
        ));
    }
}
