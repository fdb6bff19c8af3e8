// src/kiosk/adapter/mod.rs
pub mod camera;
pub mod http_backend;
