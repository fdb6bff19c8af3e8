// src/kiosk/storage/session_store.rs
//
// Session-scoped key-value store, the analogue of the browser's
// sessionStorage. Carries the verified student uid from the verification
// page to the triage/storefront pages and nothing else of consequence.
use crate::models::common::StudentUid;
use std::cell::RefCell;
use std::collections::HashMap;

pub const VERIFIED_UID_KEY: &str = "verified_uid";

thread_local! {
    static SESSION_KV: RefCell<HashMap<String, String>> = RefCell::new(HashMap::new());
}

pub fn put(key: &str, value: &str) {
    SESSION_KV.with(|kv| {
        kv.borrow_mut().insert(key.to_string(), value.to_string());
    });
}

pub fn get(key: &str) -> Option<String> {
    SESSION_KV.with(|kv| kv.borrow().get(key).cloned())
}

pub fn remove(key: &str) -> Option<String> {
    SESSION_KV.with(|kv| kv.borrow_mut().remove(key))
}

/// Drops everything session-scoped. Called when the kiosk returns to the
/// welcome screen.
pub fn clear() {
    SESSION_KV.with(|kv| kv.borrow_mut().clear());
}

// --- Verified uid helpers ---

pub fn store_verified_uid(uid: &StudentUid) {
    put(VERIFIED_UID_KEY, uid);
}

pub fn verified_uid() -> Option<StudentUid> {
    get(VERIFIED_UID_KEY)
}
