// src/kiosk/storage/profile_store.rs
//
// Cookie-style persisted profile record. The page layer treats it as an
// opaque JSON blob shaped {uid, fullName, name, age, allergy, number}; this
// module owns the encode/decode.
use crate::error::KioskError;
use crate::models::profile::StudentProfile;
use std::cell::RefCell;

thread_local! {
    static PROFILE_COOKIE: RefCell<Option<String>> = const { RefCell::new(None) };
}

pub fn save_profile(profile: &StudentProfile) -> Result<(), KioskError> {
    let encoded = serde_json::to_string(profile)
        .map_err(|e| KioskError::Storage(format!("failed to encode profile: {e}")))?;
    PROFILE_COOKIE.with(|cell| {
        *cell.borrow_mut() = Some(encoded);
    });
    Ok(())
}

pub fn load_profile() -> Result<Option<StudentProfile>, KioskError> {
    PROFILE_COOKIE.with(|cell| match cell.borrow().as_deref() {
        Some(raw) => serde_json::from_str(raw)
            .map(Some)
            .map_err(|e| KioskError::Storage(format!("failed to decode profile: {e}"))),
        None => Ok(None),
    })
}

pub fn clear_profile() {
    PROFILE_COOKIE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_round_trips_through_the_cookie_shape() {
        clear_profile();
        let profile = StudentProfile {
            uid: "STU-2024-0042".to_string(),
            full_name: "Asha Verma".to_string(),
            name: "Asha".to_string(),
            age: Some(20),
            allergy: Some("penicillin".to_string()),
            number: Some("9876543210".to_string()),
            ..Default::default()
        };
        save_profile(&profile).unwrap();
        assert_eq!(load_profile().unwrap(), Some(profile));
        clear_profile();
        assert_eq!(load_profile().unwrap(), None);
    }

    #[test]
    fn cookie_uses_the_full_name_casing_the_pages_expect() {
        clear_profile();
        save_profile(&StudentProfile {
            uid: "u".to_string(),
            full_name: "Full Name".to_string(),
            ..Default::default()
        })
        .unwrap();
        let raw = PROFILE_COOKIE.with(|c| c.borrow().clone()).unwrap();
        assert!(raw.contains("\"fullName\""));
        clear_profile();
    }
}
