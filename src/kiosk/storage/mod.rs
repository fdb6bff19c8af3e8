// src/kiosk/storage/mod.rs
pub mod audit_logs;
pub mod profile_store;
pub mod session_store;

// Re-export key storage functions for easier access
pub use audit_logs::{append_audit_entry, audit_entries, audit_len};
pub use profile_store::{clear_profile, load_profile, save_profile};
pub use session_store::{store_verified_uid, verified_uid};
