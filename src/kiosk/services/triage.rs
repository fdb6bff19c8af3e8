// src/kiosk/services/triage.rs
//
// Keyword triage. Not a model: an ordered first-match-wins rule list over
// case-insensitive substring containment, with a fixed suggestion table per
// category. Deterministic and freely re-runnable.
use crate::models::common::Language;
use crate::models::triage::{Severity, TriageAssessment, TriageCategory, TriageInput};

/// An assessment exists only above this floor (or with an image attached);
/// below it, dependent UI hides entirely.
pub const MIN_DESCRIPTION_CHARS_FOR_ASSESSMENT: usize = 10;

const CONFIDENCE_WITH_IMAGE: u8 = 85;
const CONFIDENCE_TEXT_ONLY: u8 = 65;

// Category keyword sets, tried in this order. Order is load-bearing: a
// description matching several sets gets the first one, so reordering the
// list silently reclassifies multi-keyword inputs. Pinned by tests.
const CATEGORY_RULES_EN: &[(TriageCategory, &[&str])] = &[
    (TriageCategory::Cut, &["cut", "bleed", "blood", "wound", "gash", "scratch"]),
    (TriageCategory::Rash, &["rash", "itch", "hives", "red spots"]),
    (TriageCategory::Burn, &["burn", "scald", "blister"]),
    (TriageCategory::Swelling, &["swell", "swollen", "lump", "bump"]),
    (TriageCategory::Sprain, &["sprain", "twist", "sprained"]),
    (TriageCategory::Fever, &["fever", "temperature", "chills"]),
];

const CATEGORY_RULES_HI: &[(TriageCategory, &[&str])] = &[
    (TriageCategory::Cut, &["कट", "खून", "घाव", "चोट"]),
    (TriageCategory::Rash, &["दाने", "खुजली", "चकत्ते"]),
    (TriageCategory::Burn, &["जल", "छाला"]),
    (TriageCategory::Swelling, &["सूजन", "सूजा"]),
    (TriageCategory::Sprain, &["मोच"]),
    (TriageCategory::Fever, &["बुखार", "तापमान"]),
];

const URGENT_KEYWORDS_EN: &[&str] =
    &["severe", "excessive", "deep", "fracture", "broken", "unconscious"];
const URGENT_KEYWORDS_HI: &[&str] = &["गंभीर", "गहरा", "फ्रैक्चर", "टूट", "बेहोश"];

const MILD_KEYWORDS_EN: &[&str] = &["mild", "slight", "minor", "small", "little"];
const MILD_KEYWORDS_HI: &[&str] = &["हल्का", "हल्की", "थोड़ा", "छोटा"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn pick_category(lowered: &str, has_image: bool, language: Language) -> TriageCategory {
    let rules = match language {
        Language::English => CATEGORY_RULES_EN,
        Language::Hindi => CATEGORY_RULES_HI,
    };
    for (category, keywords) in rules {
        if contains_any(lowered, keywords) {
            return *category;
        }
    }
    // A photo with no recognizable keywords is most often a visible injury.
    if has_image {
        TriageCategory::Cut
    } else {
        TriageCategory::Other
    }
}

/// Fixed lookup of first-aid items per category, in display order.
pub fn suggested_items(category: TriageCategory) -> Vec<String> {
    let items: &[&str] = match category {
        TriageCategory::Cut => &["Bandage", "Antiseptic", "Cotton"],
        TriageCategory::Burn => &["Burn Gel", "Bandage", "Pain Relief"],
        TriageCategory::Fever => &["Fever Tablet", "ORS", "Thermometer"],
        TriageCategory::Sprain => &["Cold Pack", "Bandage", "Pain Relief"],
        _ => &["Antiseptic", "Bandage"],
    };
    items.iter().map(|s| s.to_string()).collect()
}

/// Classifies a complaint. Pure function of its input: same input, same
/// assessment, no stored state.
pub fn classify(input: &TriageInput) -> TriageAssessment {
    let lowered = input.description.to_lowercase();

    let category = pick_category(&lowered, input.has_image, input.language);

    let (urgent_keywords, mild_keywords) = match input.language {
        Language::English => (URGENT_KEYWORDS_EN, MILD_KEYWORDS_EN),
        Language::Hindi => (URGENT_KEYWORDS_HI, MILD_KEYWORDS_HI),
    };

    // Burns are always treated as urgent, keywords or not.
    let urgent = contains_any(&lowered, urgent_keywords) || category == TriageCategory::Burn;

    // Urgency is evaluated first and short-circuits: "mild but deep" is High.
    let severity = if urgent {
        Severity::High
    } else if contains_any(&lowered, mild_keywords) {
        Severity::Low
    } else {
        Severity::Moderate
    };

    let confidence = if input.has_image {
        CONFIDENCE_WITH_IMAGE
    } else {
        CONFIDENCE_TEXT_ONLY
    };

    TriageAssessment {
        category,
        confidence,
        severity,
        needs_doctor: urgent || severity == Severity::High,
        suggested_items: suggested_items(category),
    }
}

/// Recomputation trigger for the live preview: an assessment exists once the
/// description is long enough OR an image is attached; otherwise it is
/// explicitly absent.
pub fn assess(input: &TriageInput) -> Option<TriageAssessment> {
    if input.description.chars().count() > MIN_DESCRIPTION_CHARS_FOR_ASSESSMENT || input.has_image {
        Some(classify(input))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english(description: &str, has_image: bool) -> TriageInput {
        TriageInput {
            description: description.to_string(),
            has_image,
            language: Language::English,
        }
    }

    #[test]
    fn urgent_keywords_force_high_severity_and_doctor() {
        for keyword in URGENT_KEYWORDS_EN {
            let out = classify(&english(&format!("a {keyword} injury on my arm"), false));
            assert_eq!(out.severity, Severity::High, "keyword {keyword}");
            assert!(out.needs_doctor, "keyword {keyword}");
        }
    }

    #[test]
    fn burns_are_high_severity_even_without_urgent_keywords() {
        let out = classify(&english("small burn from the kettle", false));
        assert_eq!(out.category, TriageCategory::Burn);
        assert_eq!(out.severity, Severity::High);
        assert!(out.needs_doctor);
    }

    #[test]
    fn empty_input_is_deterministic_other_moderate() {
        let out = classify(&english("", false));
        assert_eq!(out.category, TriageCategory::Other);
        assert_eq!(out.severity, Severity::Moderate);
        assert_eq!(out.confidence, 65);
        assert!(!out.needs_doctor);
    }

    #[test]
    fn mild_and_urgent_together_is_high() {
        // Urgency short-circuits before the mild check.
        let out = classify(&english("mild but quite a deep cut", false));
        assert_eq!(out.severity, Severity::High);
    }

    #[test]
    fn category_priority_order_is_first_match_wins() {
        // "cut" outranks "swollen" because Cut is tried before Swelling.
        let out = classify(&english("cut and swollen finger", false));
        assert_eq!(out.category, TriageCategory::Cut);

        // "rash" outranks "fever" for the same reason.
        let out = classify(&english("rash with fever since morning", false));
        assert_eq!(out.category, TriageCategory::Rash);
    }

    #[test]
    fn image_defaults_to_cut_when_no_keywords_match() {
        let out = classify(&english("it hurts near my elbow", true));
        assert_eq!(out.category, TriageCategory::Cut);
        assert_eq!(out.confidence, 85);
    }

    #[test]
    fn suggestions_follow_the_category_table() {
        let out = classify(&english("fever and chills", false));
        assert_eq!(out.suggested_items, vec!["Fever Tablet", "ORS", "Thermometer"]);

        let out = classify(&english("no keywords here at all", false));
        assert_eq!(out.suggested_items, vec!["Antiseptic", "Bandage"]);
    }

    #[test]
    fn hindi_urgent_keywords_are_recognized() {
        let input = TriageInput {
            description: "हाथ पर गहरा घाव".to_string(),
            has_image: false,
            language: Language::Hindi,
        };
        let out = classify(&input);
        assert_eq!(out.category, TriageCategory::Cut);
        assert_eq!(out.severity, Severity::High);
        assert!(out.needs_doctor);
    }

    #[test]
    fn assessment_clears_below_the_input_floor() {
        assert!(assess(&english("short", false)).is_none());
        assert!(assess(&english("short", true)).is_some());
        assert!(assess(&english("a description long enough", false)).is_some());
        // Exactly at the floor is still absent; the trigger is strictly greater.
        assert!(assess(&english("ten chars.", false)).is_none());
    }
}
