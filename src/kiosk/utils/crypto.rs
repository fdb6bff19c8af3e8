// src/kiosk/utils/crypto.rs
use sha2::{Digest, Sha256};

const MASK_DIGEST_CHARS: usize = 8;

/// Reduces a student uid to a short token fit for the audit trail: the last
/// two characters stay readable, the rest is a truncated SHA-256 digest.
/// The raw uid never reaches the log.
pub fn mask_student_uid(uid: &str) -> String {
    let digest = Sha256::digest(uid.as_bytes());
    let short = &hex::encode(digest)[..MASK_DIGEST_CHARS];
    let tail: String = uid
        .chars()
        .rev()
        .take(2)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("{}..{}", short, tail)
}
