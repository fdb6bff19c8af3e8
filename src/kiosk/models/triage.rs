// src/kiosk/models/triage.rs
use crate::models::common::Language;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy)]
pub enum TriageCategory {
    Cut,
    Rash,
    Burn,
    Swelling,
    SkinIrritation,
    Fever,
    Sprain,
    Other,
}

impl TriageCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TriageCategory::Cut => "Cut",
            TriageCategory::Rash => "Rash",
            TriageCategory::Burn => "Burn",
            TriageCategory::Swelling => "Swelling",
            TriageCategory::SkinIrritation => "Skin Irritation",
            TriageCategory::Fever => "Fever",
            TriageCategory::Sprain => "Sprain",
            TriageCategory::Other => "Other",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Copy, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Moderate,
    High,
}

#[derive(Clone, Debug, Default)]
pub struct TriageInput {
    pub description: String,
    pub has_image: bool,
    pub language: Language,
}

/// Derived from a `TriageInput`, never stored. Recomputed whenever either
/// input changes; cleared to `None` (not "unknown") below the input floor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TriageAssessment {
    pub category: TriageCategory,
    /// Not a model score. 85 when an image is attached, 65 otherwise.
    pub confidence: u8,
    pub severity: Severity,
    pub needs_doctor: bool,
    pub suggested_items: Vec<String>,
}
