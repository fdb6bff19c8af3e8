// src/kiosk/utils/guards.rs
use crate::error::KioskError;

/// Minimum description length the Analyze action accepts.
pub const MIN_ANALYZE_DESCRIPTION_CHARS: usize = 10;

/// Gate in front of the Analyze action. A hard two-part precondition, not
/// advisory: BOTH a photo and a long-enough description are required, and the
/// error names exactly which part(s) are missing.
pub fn check_analyze_ready(description: &str, has_image: bool) -> Result<(), KioskError> {
    let mut missing: Vec<&str> = Vec::new();
    if !has_image {
        missing.push("a photo of the affected area");
    }
    if description.trim().chars().count() < MIN_ANALYZE_DESCRIPTION_CHARS {
        missing.push("a description of at least 10 characters");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(KioskError::Validation(format!(
            "Please add {}",
            missing.join(" and ")
        )))
    }
}
